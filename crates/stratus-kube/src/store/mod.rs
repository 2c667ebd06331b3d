//! Store drivers for manifest sets
//!
//! The status updater talks to the store through one small contract; two
//! drivers implement it:
//! - **Kube** (default): the live cluster, through the dynamic API and the
//!   status subresource
//! - **Mock**: in-memory with resource-version bookkeeping, for unit tests
//!   without a cluster

mod kube;
mod mock;

pub use self::kube::KubeManifestSetStore;
pub use self::mock::{MockManifestSetStore, OperationCounts};

use async_trait::async_trait;

use stratus_api::ManifestSet;

use crate::error::Result;

/// Fetch and conditionally write manifest sets
///
/// `update_status` is a conditional write keyed on the resource version the
/// argument carries: implementations must reject the write with an error
/// satisfying [`StatusError::is_conflict`](crate::StatusError::is_conflict)
/// when the stored version has advanced past it.
///
/// Implementations must be Send + Sync for use across async tasks.
#[async_trait]
pub trait ManifestSetStore: Send + Sync {
    /// Fetch the current copy of a manifest set, resource version included
    async fn get(&self, namespace: &str, name: &str) -> Result<ManifestSet>;

    /// Persist the status if the resource version still matches, returning
    /// the persisted copy with its advanced version
    async fn update_status(&self, manifest_set: &ManifestSet) -> Result<ManifestSet>;
}
