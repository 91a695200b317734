//! **A library for comparing Software Bills of Materials (SBOMs).**
//!
//! `sbomdiff` parses two SBOM files, normalizes them into a shared
//! package-level model, and reports the differences between them. It supports
//! the **SPDX** and **CycloneDX** standards across their common serialization
//! dialects and powers both a command-line tool and a Rust library API.
//!
//! ## Key Features
//!
//! - **Multi-Dialect Parsing**: Ingests SPDX (tag-value, JSON, YAML, RDF,
//!   XML) and CycloneDX (JSON, XML) files, with automatic standard
//!   detection per file.
//! - **Package-Level Diffing**: Joins the two SBOMs on package name and
//!   reports version changes, license changes, removed packages and newly
//!   added packages.
//! - **Flexible Reporting**: Renders results as human-readable text or as
//!   structured JSON/YAML documents, to stdout or a file.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The canonical representation: a [`PackageSet`] mapping
//!   package names to version and license, independent of the input dialect.
//! - **[`parsers`]**: Converts SPDX and `CycloneDX` files into a
//!   [`PackageSet`]; the [`FormatDetector`] resolves the standard when the
//!   caller does not pin one.
//! - **[`diff`]**: Home of the [`DiffEngine`], which compares two package
//!   sets and produces a [`DiffResult`].
//! - **[`reports`]**: Renders a [`DiffResult`] in the selected output format.
//! - **[`pipeline`]**: CLI plumbing: exit codes and report output targets.
//!
//! ## Getting Started: Diffing Two SBOMs
//!
//! ```no_run
//! use std::path::Path;
//! use sbomdiff::{DiffEngine, FormatDetector, StandardHint};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detector = FormatDetector::new();
//!     let (old, _) = detector.detect_and_parse(Path::new("old.spdx.json"), StandardHint::Auto)?;
//!     let (new, _) = detector.detect_and_parse(Path::new("new.spdx.json"), StandardHint::Auto)?;
//!
//!     let result = DiffEngine::new().diff(&old, &new);
//!     println!("Removed packages: {}", result.summary.removed_packages);
//!     println!("New packages:     {}", result.summary.new_packages);
//!
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors / # Panics doc sections are not maintained for every fallible fn
    clippy::missing_errors_doc,
    // self is kept for API consistency across the parser types
    clippy::unused_self
)]

pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use diff::{ChangeStatus, DiffEngine, DiffOptions, DiffRecord, DiffResult, DiffSummary};
pub use error::{ParseError, ReportError, Result};
pub use model::{Package, PackageSet};
pub use parsers::{CycloneDxParser, FormatDetector, SbomStandard, SpdxParser, StandardHint};
pub use reports::{ReportFormat, ReportGenerator};
