//! Error types for sbomdiff.
//!
//! Per-entry omissions inside a document (a component without a name, a
//! missing `packages` container) are never errors — the parsers skip the
//! entry or return an empty set so that format auto-detection can use the
//! empty result as a signal. Only an unreadable file or syntactically broken
//! JSON/XML/YAML surfaces as a [`ParseError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and parsing an SBOM file
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),
}

impl ParseError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Errors that can occur while rendering a diff report
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenient Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
