//! Diff result structures.

use serde::{Deserialize, Serialize};

/// Classification of a detected difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// Present in both sets with a differing version and/or license
    Change,
    /// Present only in the first set
    Remove,
    /// Present only in the second set
    Add,
}

/// A `from`/`to` pair for one changed field.
///
/// `remove` records never carry a `to` value and `add` records never carry a
/// `from` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    #[serde(rename = "from", skip_serializing_if = "Option::is_none", default)]
    pub from: Option<String>,
    #[serde(rename = "to", skip_serializing_if = "Option::is_none", default)]
    pub to: Option<String>,
}

impl FieldDelta {
    /// Delta with both sides, for `change` records
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// `from`-only delta, for `remove` records
    pub fn removed(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: None,
        }
    }

    /// `to`-only delta, for `add` records
    pub fn added(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: Some(to.into()),
        }
    }
}

/// One detected difference between the two package sets.
///
/// A single `change` record may carry both a version and a license delta;
/// every record carries at least one non-empty delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Package name, the shared join key
    pub package: String,
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<FieldDelta>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub license: Option<FieldDelta>,
}

/// Aggregate difference counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub version_changes: usize,
    pub license_changes: usize,
    pub removed_packages: usize,
    pub new_packages: usize,
}

/// Complete result of one diff invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Difference records, ordered by set1 iteration order then set2
    pub records: Vec<DiffRecord>,
    /// Aggregate counts, accumulated in lock-step with the records
    pub summary: DiffSummary,
    /// Whether license comparison was excluded for this invocation
    pub license_excluded: bool,
}

impl DiffResult {
    /// Whether any of the four difference counters is non-zero.
    ///
    /// This is the boolean the surrounding CLI translates into an exit
    /// status.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.summary.version_changes > 0
            || self.summary.license_changes > 0
            || self.summary.removed_packages > 0
            || self.summary.new_packages > 0
    }
}
