//! Canonical data structures for normalized SBOMs.
//!
//! Every supported dialect — five SPDX serializations and two `CycloneDX`
//! serializations — is reduced to the same shape before diffing: a
//! [`PackageSet`] mapping package names to [`Package`] records. Lookups are
//! by name only; insertion order reflects document order and drives the
//! deterministic ordering of diff output.

mod license;

pub use license::LicenseResolver;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Version string used when a document omits the package version.
pub const UNKNOWN_VERSION: &str = "UNKNOWN";

/// License string used when a document carries no license information.
pub const LICENSE_NOT_FOUND: &str = "NOT FOUND";

/// License string used when license information is present but empty or
/// unresolvable.
pub const LICENSE_UNKNOWN: &str = "UNKNOWN";

/// One canonical package record: the version and license extracted from a
/// single SBOM entry. The package name lives in the owning [`PackageSet`] key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Version string, `"UNKNOWN"` when the source document omits it
    pub version: String,
    /// License string, `"NOT FOUND"` when absent, `"UNKNOWN"` when
    /// present but unresolvable
    pub license: String,
}

impl Package {
    /// Create a package record from version and license strings
    pub fn new(version: impl Into<String>, license: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            license: license.into(),
        }
    }
}

/// Mapping from package name to its canonical record, built from exactly one
/// input file.
///
/// Names are unique within a set; the first occurrence wins and later
/// duplicates are silently discarded. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSet {
    packages: IndexMap<String, Package>,
}

impl PackageSet {
    /// Create an empty package set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, keeping the first record seen for a given name.
    ///
    /// Returns `true` if the package was inserted, `false` if a record with
    /// the same name was already present.
    pub fn insert(&mut self, name: impl Into<String>, package: Package) -> bool {
        let name = name.into();
        if self.packages.contains_key(&name) {
            return false;
        }
        self.packages.insert(name, package);
        true
    }

    /// Look up a package by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Check whether a package name is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of packages in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check whether the set holds no packages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Iterate over `(name, package)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Package)> {
        self.packages.iter().map(|(name, pkg)| (name.as_str(), pkg))
    }
}

impl FromIterator<(String, Package)> for PackageSet {
    fn from_iter<I: IntoIterator<Item = (String, Package)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, package) in iter {
            set.insert(name, package);
        }
        set
    }
}
