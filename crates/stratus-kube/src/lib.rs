//! Stratus Kube - status reconciliation against a cluster
//!
//! This crate provides:
//! - **Condition Merging**: insert-or-update semantics for status conditions
//!   that only advance transition timestamps on real status flips
//! - **Status Updates**: an optimistic read-modify-write loop that absorbs
//!   version conflicts from concurrent writers by refetching and retrying
//! - **Store Drivers**: the `ManifestSetStore` contract with a live-cluster
//!   driver (dynamic API, status subresource) and an in-memory mock for
//!   tests without a cluster

pub mod conditions;
pub mod error;
pub mod status;
pub mod store;

pub use conditions::{
    find_manifest_condition, find_status_condition, is_status_condition_false,
    is_status_condition_present_and_equal, is_status_condition_true, merge_status_conditions,
    remove_status_condition, set_manifest_condition, set_status_condition,
};
pub use error::{Result, StatusError};
pub use status::{set_condition_fn, update_manifest_set_status};
pub use store::{KubeManifestSetStore, ManifestSetStore, MockManifestSetStore, OperationCounts};
