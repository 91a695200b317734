//! Pipeline orchestration for the diff workflow.
//!
//! Shared plumbing between the library and the CLI: process exit codes and
//! report output handling.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// No differences detected
    pub const SUCCESS: i32 = 0;
    /// Differences were detected
    pub const DIFFERENCES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 2;
}

/// Target for the rendered report - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }
}

/// Write the rendered report to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            tracing::info!("Report written to {:?}", path);
            Ok(())
        }
    }
}
