//! Property-based tests for the diff engine.

use proptest::collection::btree_map;
use proptest::prelude::*;
use sbomdiff::{ChangeStatus, DiffEngine, Package, PackageSet};
use std::collections::BTreeMap;

fn arb_package() -> impl Strategy<Value = Package> {
    (
        "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
        prop_oneof![
            Just("MIT".to_string()),
            Just("Apache-2.0".to_string()),
            Just("GPL-2.0-only".to_string()),
            Just("NOT FOUND".to_string()),
        ],
    )
        .prop_map(|(version, license)| Package::new(version, license))
}

fn arb_package_set() -> impl Strategy<Value = PackageSet> {
    btree_map("[a-z]{1,6}", arb_package(), 0..12)
        .prop_map(|entries: BTreeMap<String, Package>| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn diff_with_self_is_empty(set in arb_package_set()) {
        let result = DiffEngine::new().diff(&set, &set);
        prop_assert!(result.records.is_empty());
        prop_assert!(!result.has_differences());
    }

    #[test]
    fn summary_counts_match_record_tallies(
        set1 in arb_package_set(),
        set2 in arb_package_set(),
    ) {
        let result = DiffEngine::new().diff(&set1, &set2);

        let removed = result
            .records
            .iter()
            .filter(|r| r.status == ChangeStatus::Remove)
            .count();
        let added = result
            .records
            .iter()
            .filter(|r| r.status == ChangeStatus::Add)
            .count();
        let version_changes = result
            .records
            .iter()
            .filter(|r| r.status == ChangeStatus::Change && r.version.is_some())
            .count();
        let license_changes = result
            .records
            .iter()
            .filter(|r| r.status == ChangeStatus::Change && r.license.is_some())
            .count();

        prop_assert_eq!(result.summary.removed_packages, removed);
        prop_assert_eq!(result.summary.new_packages, added);
        prop_assert_eq!(result.summary.version_changes, version_changes);
        prop_assert_eq!(result.summary.license_changes, license_changes);
    }

    #[test]
    fn records_partition_on_package_membership(
        set1 in arb_package_set(),
        set2 in arb_package_set(),
    ) {
        let result = DiffEngine::new().diff(&set1, &set2);

        for record in &result.records {
            let in1 = set1.contains(&record.package);
            let in2 = set2.contains(&record.package);
            match record.status {
                ChangeStatus::Change => prop_assert!(in1 && in2),
                ChangeStatus::Remove => prop_assert!(in1 && !in2),
                ChangeStatus::Add => prop_assert!(!in1 && in2),
            }
            prop_assert!(record.version.is_some() || record.license.is_some());
        }
    }

    #[test]
    fn removed_count_equals_set_difference(
        set1 in arb_package_set(),
        set2 in arb_package_set(),
    ) {
        let result = DiffEngine::new().diff(&set1, &set2);

        let expected_removed = set1.iter().filter(|(name, _)| !set2.contains(name)).count();
        let expected_added = set2.iter().filter(|(name, _)| !set1.contains(name)).count();
        prop_assert_eq!(result.summary.removed_packages, expected_removed);
        prop_assert_eq!(result.summary.new_packages, expected_added);
    }
}
