//! Stratus API - resource model for status reconciliation
//!
//! This crate defines the `ManifestSet` resource: a set of workload
//! manifests a work agent applies to a managed cluster, together with the
//! condition types its status is built from. The types here are plain data;
//! all merging and persistence logic lives in `stratus-kube`.

pub mod condition;
pub mod manifest_set;

pub use condition::{
    ConditionStatus, ManifestCondition, ManifestResourceMeta, StatusCondition, condition_types,
};
pub use manifest_set::{Manifest, ManifestSet, ManifestSetSpec, ManifestSetStatus};
