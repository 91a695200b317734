//! SBOM standard detection.
//!
//! When the caller does not pin the standard, SPDX parsing is attempted
//! first; an empty result is the signal to fall back to `CycloneDX` for that
//! file. Detection is independent per file, so the two inputs of a diff may
//! resolve to different standards.

use crate::error::Result;
use crate::model::PackageSet;
use crate::parsers::{CycloneDxParser, SpdxParser};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Caller-supplied hint for the SBOM standard of an input file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StandardHint {
    /// Try SPDX first, fall back to `CycloneDX` when it yields no packages
    #[default]
    Auto,
    /// Parse as SPDX unconditionally
    Spdx,
    /// Parse as `CycloneDX` unconditionally
    #[value(name = "cyclonedx")]
    CycloneDx,
}

/// The SBOM standard a file resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SbomStandard {
    Spdx,
    CycloneDx,
}

impl fmt::Display for SbomStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spdx => write!(f, "SPDX"),
            Self::CycloneDx => write!(f, "CYCLONEDX"),
        }
    }
}

/// Orchestrates per-file standard detection and parsing
#[derive(Debug, Default)]
pub struct FormatDetector {
    spdx: SpdxParser,
    cyclonedx: CycloneDxParser,
}

impl FormatDetector {
    /// Create a new format detector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one input file, resolving its SBOM standard from the hint.
    ///
    /// Under [`StandardHint::Auto`] an empty SPDX result switches the file
    /// to `CycloneDX`; the `CycloneDX` result is used even when it is also
    /// empty.
    pub fn detect_and_parse(
        &self,
        path: &Path,
        hint: StandardHint,
    ) -> Result<(PackageSet, SbomStandard)> {
        match hint {
            StandardHint::Spdx => Ok((self.spdx.parse(path)?, SbomStandard::Spdx)),
            StandardHint::CycloneDx => {
                Ok((self.cyclonedx.parse(path)?, SbomStandard::CycloneDx))
            }
            StandardHint::Auto => {
                let packages = self.spdx.parse(path)?;
                if packages.is_empty() {
                    tracing::debug!(
                        "SPDX parse of {} yielded no packages, trying CycloneDX",
                        path.display()
                    );
                    Ok((self.cyclonedx.parse(path)?, SbomStandard::CycloneDx))
                } else {
                    Ok((packages, SbomStandard::Spdx))
                }
            }
        }
    }
}
