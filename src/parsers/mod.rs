//! SBOM format parsers.
//!
//! This module provides parsers for the SPDX and `CycloneDX` standards,
//! converting their serialization dialects to the canonical [`PackageSet`]
//! representation.
//!
//! ## Dialect dispatch
//!
//! The dialect is chosen from the filename suffix alone:
//!
//! | Suffix | Dialect |
//! |---|---|
//! | `.spdx` | SPDX tag-value |
//! | `.spdx.json`, `.json` | SPDX JSON |
//! | `.spdx.rdf` | SPDX RDF line text |
//! | `.spdx.xml` | SPDX XML |
//! | `.spdx.yaml`, `.spdx.yml` | SPDX YAML |
//! | `.json` | `CycloneDX` JSON |
//! | `.xml` | `CycloneDX` XML |
//!
//! Any other suffix yields an empty set rather than an error; the
//! [`FormatDetector`] relies on that to fall back between standards.

mod cyclonedx;
mod detection;
pub(crate) mod spdx;

pub use cyclonedx::CycloneDxParser;
pub use detection::{FormatDetector, SbomStandard, StandardHint};
pub use spdx::SpdxParser;

use crate::error::{ParseError, Result};
use std::path::Path;

/// Read an SBOM file to a string, attaching the path to IO failures
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e))
}
