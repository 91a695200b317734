//! SBOM difference computation.
//!
//! The [`DiffEngine`] joins two canonical [`PackageSet`]s on package name and
//! emits a [`DiffResult`] with one record per changed, removed or added
//! package plus aggregate counts.
//!
//! [`PackageSet`]: crate::model::PackageSet

mod engine;
mod result;

pub use engine::{DiffEngine, DiffOptions};
pub use result::{ChangeStatus, DiffRecord, DiffResult, DiffSummary, FieldDelta};
