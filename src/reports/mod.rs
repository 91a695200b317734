//! Report rendering.
//!
//! Renders a [`DiffResult`] as plain text, JSON or YAML. The structured
//! formats share one serializable document shape so the two machine-readable
//! outputs are equivalent.

use crate::diff::{ChangeStatus, DiffRecord, DiffResult};
use crate::error::ReportError;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for a diff report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable line-per-difference text
    #[default]
    Text,
    Json,
    Yaml,
}

/// Envelope for the structured report formats
#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    tool: ToolInfo,
    file_1: &'a str,
    file_2: &'a str,
    differences: &'a [DiffRecord],
    summary: ReportSummary,
}

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ToolInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Summary block for the structured formats; the license counter is dropped
/// when license comparison was excluded
#[derive(Debug, Serialize)]
struct ReportSummary {
    version_changes: usize,
    new_packages: usize,
    removed_packages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_changes: Option<usize>,
}

impl ReportSummary {
    fn from_result(result: &DiffResult) -> Self {
        Self {
            version_changes: result.summary.version_changes,
            new_packages: result.summary.new_packages,
            removed_packages: result.summary.removed_packages,
            license_changes: (!result.license_excluded)
                .then_some(result.summary.license_changes),
        }
    }
}

/// Renders diff results in the configured format
#[derive(Debug, Default)]
pub struct ReportGenerator {
    format: ReportFormat,
}

impl ReportGenerator {
    /// Create a generator for the given format
    #[must_use]
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render `result` as a complete report, including the input file names
    pub fn generate(
        &self,
        result: &DiffResult,
        file_1: &str,
        file_2: &str,
    ) -> Result<String, ReportError> {
        match self.format {
            ReportFormat::Text => Ok(Self::render_text(result)),
            ReportFormat::Json => {
                let doc = Self::document(result, file_1, file_2);
                Ok(serde_json::to_string_pretty(&doc)?)
            }
            ReportFormat::Yaml => {
                let doc = Self::document(result, file_1, file_2);
                Ok(serde_yaml::to_string(&doc)?)
            }
        }
    }

    fn document<'a>(result: &'a DiffResult, file_1: &'a str, file_2: &'a str) -> ReportDocument<'a> {
        ReportDocument {
            tool: ToolInfo::current(),
            file_1,
            file_2,
            differences: &result.records,
            summary: ReportSummary::from_result(result),
        }
    }

    fn render_text(result: &DiffResult) -> String {
        let mut out = String::new();
        for record in &result.records {
            Self::render_text_record(&mut out, record);
        }

        let _ = writeln!(out, "\nSummary");
        let _ = writeln!(out, "-------");
        let _ = writeln!(out, "Version changes:  {}", result.summary.version_changes);
        if !result.license_excluded {
            let _ = writeln!(out, "License changes:  {}", result.summary.license_changes);
        }
        let _ = writeln!(out, "Removed packages: {}", result.summary.removed_packages);
        let _ = writeln!(out, "New packages:     {}", result.summary.new_packages);
        out
    }

    /// One text line per changed field; a change record with both deltas
    /// emits a VERSION line followed by a LICENSE line.
    fn render_text_record(out: &mut String, record: &DiffRecord) {
        match record.status {
            ChangeStatus::Change => {
                if let Some(delta) = &record.version {
                    let _ = writeln!(
                        out,
                        "[VERSION] {}: Version changed from {} to {}",
                        record.package,
                        delta.from.as_deref().unwrap_or_default(),
                        delta.to.as_deref().unwrap_or_default(),
                    );
                }
                if let Some(delta) = &record.license {
                    let _ = writeln!(
                        out,
                        "[LICENSE] {}: License changed from {} to {}",
                        record.package,
                        delta.from.as_deref().unwrap_or_default(),
                        delta.to.as_deref().unwrap_or_default(),
                    );
                }
            }
            ChangeStatus::Remove => {
                let version = record
                    .version
                    .as_ref()
                    .and_then(|d| d.from.as_deref())
                    .unwrap_or_default();
                let _ = writeln!(out, "[REMOVED] {}: (Version {version})", record.package);
            }
            ChangeStatus::Add => {
                let version = record
                    .version
                    .as_ref()
                    .and_then(|d| d.to.as_deref())
                    .unwrap_or_default();
                let license = record
                    .license
                    .as_ref()
                    .and_then(|d| d.to.as_deref())
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "[ADDED  ] {}: (Version {version}) (License {license})",
                    record.package
                );
            }
        }
    }
}
