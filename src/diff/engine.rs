//! Package set comparison.

use crate::diff::result::{ChangeStatus, DiffRecord, DiffResult, DiffSummary, FieldDelta};
use crate::model::{Package, PackageSet, UNKNOWN_VERSION};

/// Options controlling a diff invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Suppress license comparison entirely
    pub exclude_license: bool,
}

/// Compares two canonical package sets.
///
/// Packages are joined on name. A name in both sets with a differing version
/// and/or license produces one `change` record; a name only in the first set
/// produces a `remove` record and a name only in the second an `add` record.
/// Versions are compared case-insensitively, but change records report the
/// values as parsed.
#[derive(Debug, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Engine with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit options
    #[must_use]
    pub fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare `set1` (the older SBOM) against `set2` (the newer one).
    ///
    /// Records are ordered by `set1` iteration order, then the `set2`-only
    /// names in `set2` order. The summary counters are accumulated in
    /// lock-step with the records.
    pub fn diff(&self, set1: &PackageSet, set2: &PackageSet) -> DiffResult {
        let mut records = Vec::new();
        let mut summary = DiffSummary::default();

        for (name, before) in set1.iter() {
            match set2.get(name) {
                Some(after) => {
                    if let Some(record) = self.compare(name, before, after, &mut summary) {
                        records.push(record);
                    }
                }
                None => {
                    summary.removed_packages += 1;
                    records.push(DiffRecord {
                        package: name.to_string(),
                        status: ChangeStatus::Remove,
                        version: Some(FieldDelta::removed(normalized_version(before))),
                        license: None,
                    });
                }
            }
        }

        for (name, after) in set2.iter() {
            if !set1.contains(name) {
                summary.new_packages += 1;
                records.push(DiffRecord {
                    package: name.to_string(),
                    status: ChangeStatus::Add,
                    version: Some(FieldDelta::added(normalized_version(after))),
                    license: Some(FieldDelta::added(after.license.clone())),
                });
            }
        }

        DiffResult {
            records,
            summary,
            license_excluded: self.options.exclude_license,
        }
    }

    /// Compare one package present in both sets; `None` means no change
    fn compare(
        &self,
        name: &str,
        before: &Package,
        after: &Package,
        summary: &mut DiffSummary,
    ) -> Option<DiffRecord> {
        let version = if before.version.to_uppercase() != after.version.to_uppercase() {
            summary.version_changes += 1;
            Some(FieldDelta::between(
                display_version(&before.version),
                display_version(&after.version),
            ))
        } else {
            None
        };

        let license = if !self.options.exclude_license && before.license != after.license {
            summary.license_changes += 1;
            Some(FieldDelta::between(&before.license, &after.license))
        } else {
            None
        };

        if version.is_none() && license.is_none() {
            return None;
        }
        Some(DiffRecord {
            package: name.to_string(),
            status: ChangeStatus::Change,
            version,
            license,
        })
    }
}

/// Version value as rendered in change records: source case preserved,
/// empty rendered as `UNKNOWN`
fn display_version(version: &str) -> &str {
    if version.is_empty() {
        UNKNOWN_VERSION
    } else {
        version
    }
}

/// Upper-cased version for `remove`/`add` records, defaulting empty to
/// `UNKNOWN`
fn normalized_version(package: &Package) -> String {
    if package.version.is_empty() {
        UNKNOWN_VERSION.to_string()
    } else {
        package.version.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, &str, &str)]) -> PackageSet {
        entries
            .iter()
            .map(|(name, version, license)| {
                (name.to_string(), Package::new(*version, *license))
            })
            .collect()
    }

    #[test]
    fn test_version_change() {
        let set1 = set(&[("openssl", "1.1.1", "OpenSSL")]);
        let set2 = set(&[("openssl", "3.0.13", "Apache-2.0")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.status, ChangeStatus::Change);
        assert_eq!(
            record.version,
            Some(FieldDelta::between("1.1.1", "3.0.13"))
        );
        assert_eq!(
            record.license,
            Some(FieldDelta::between("OpenSSL", "Apache-2.0"))
        );
        assert_eq!(result.summary.version_changes, 1);
        assert_eq!(result.summary.license_changes, 1);
    }

    #[test]
    fn test_version_compare_is_case_insensitive() {
        let set1 = set(&[("pkg", "1.0rc1", "MIT")]);
        let set2 = set(&[("pkg", "1.0RC1", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);
        assert!(result.records.is_empty());
        assert!(!result.has_differences());
    }

    #[test]
    fn test_change_record_preserves_version_case() {
        let set1 = set(&[("pkg", "1.0rc1", "MIT")]);
        let set2 = set(&[("pkg", "2.0rc1", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);
        assert_eq!(
            result.records[0].version,
            Some(FieldDelta::between("1.0rc1", "2.0rc1"))
        );
    }

    #[test]
    fn test_removed_package() {
        let set1 = set(&[("left", "1.0", "MIT"), ("both", "1.0", "MIT")]);
        let set2 = set(&[("both", "1.0", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.package, "left");
        assert_eq!(record.status, ChangeStatus::Remove);
        assert_eq!(record.version, Some(FieldDelta::removed("1.0")));
        assert!(record.license.is_none());
        assert_eq!(result.summary.removed_packages, 1);
    }

    #[test]
    fn test_added_package_carries_version_and_license() {
        let set1 = set(&[]);
        let set2 = set(&[("fresh", "0.1.0", "BSD-3-Clause")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        let record = &result.records[0];
        assert_eq!(record.status, ChangeStatus::Add);
        assert_eq!(record.version, Some(FieldDelta::added("0.1.0")));
        assert_eq!(record.license, Some(FieldDelta::added("BSD-3-Clause")));
        assert_eq!(result.summary.new_packages, 1);
    }

    #[test]
    fn test_add_and_remove_versions_are_upper_cased() {
        let set1 = set(&[("gone", "1.0b2", "MIT")]);
        let set2 = set(&[("new", "2.0rc1", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        assert_eq!(result.records[0].version, Some(FieldDelta::removed("1.0B2")));
        assert_eq!(result.records[1].version, Some(FieldDelta::added("2.0RC1")));
    }

    #[test]
    fn test_change_record_renders_empty_version_as_unknown() {
        let set1 = set(&[("pkg", "", "MIT")]);
        let set2 = set(&[("pkg", "1.0", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);
        assert_eq!(
            result.records[0].version,
            Some(FieldDelta::between("UNKNOWN", "1.0"))
        );
        assert_eq!(result.summary.version_changes, 1);
    }

    #[test]
    fn test_empty_version_reported_as_unknown() {
        let set1 = set(&[("gone", "", "MIT")]);
        let set2 = set(&[("new", "", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        assert_eq!(result.records[0].version, Some(FieldDelta::removed("UNKNOWN")));
        assert_eq!(result.records[1].version, Some(FieldDelta::added("UNKNOWN")));
    }

    #[test]
    fn test_identical_sets_have_no_differences() {
        let set1 = set(&[("a", "1.0", "MIT"), ("b", "2.0", "Apache-2.0")]);
        let result = DiffEngine::new().diff(&set1, &set1);
        assert!(result.records.is_empty());
        assert_eq!(result.summary, DiffSummary::default());
        assert!(!result.has_differences());
    }

    #[test]
    fn test_exclude_license_suppresses_license_deltas() {
        let set1 = set(&[("pkg", "1.0", "MIT")]);
        let set2 = set(&[("pkg", "1.0", "GPL-2.0-only")]);
        let engine = DiffEngine::with_options(DiffOptions {
            exclude_license: true,
        });
        let result = engine.diff(&set1, &set2);

        assert!(result.records.is_empty());
        assert_eq!(result.summary.license_changes, 0);
        assert!(result.license_excluded);
    }

    #[test]
    fn test_license_only_change() {
        let set1 = set(&[("pkg", "1.0", "MIT")]);
        let set2 = set(&[("pkg", "1.0", "Apache-2.0")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        let record = &result.records[0];
        assert_eq!(record.status, ChangeStatus::Change);
        assert!(record.version.is_none());
        assert_eq!(
            record.license,
            Some(FieldDelta::between("MIT", "Apache-2.0"))
        );
        assert_eq!(result.summary.version_changes, 0);
        assert_eq!(result.summary.license_changes, 1);
    }

    #[test]
    fn test_record_ordering_follows_input_order() {
        let set1 = set(&[("z", "1.0", "MIT"), ("a", "1.0", "MIT")]);
        let set2 = set(&[("m", "1.0", "MIT")]);
        let result = DiffEngine::new().diff(&set1, &set2);

        let names: Vec<&str> = result.records.iter().map(|r| r.package.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }
}
