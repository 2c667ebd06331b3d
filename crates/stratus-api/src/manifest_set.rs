//! The `ManifestSet` resource
//!
//! A `ManifestSet` carries a workload of raw manifests in its spec and the
//! observed application state in its status: one flat list of set-level
//! conditions plus one condition set per manifest, ordered by application
//! order. The resource is identified by namespace and name; the resource
//! version is the store's opaque optimistic-concurrency token.

use serde::{Deserialize, Serialize};

use crate::condition::{ManifestCondition, StatusCondition};

/// API group the resource is served under
pub const GROUP: &str = "work.stratus.dev";

/// API version within [`GROUP`]
pub const VERSION: &str = "v1";

/// Resource kind
pub const KIND: &str = "ManifestSet";

/// Full apiVersion string
pub const API_VERSION: &str = "work.stratus.dev/v1";

/// A single workload manifest, carried as raw JSON
///
/// The core never interprets the payload; it is applied verbatim by the
/// work agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(pub serde_json::Value);

/// Desired workload of a manifest set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSetSpec {
    /// Manifests to apply, in order
    #[serde(default)]
    pub manifests: Vec<Manifest>,
}

/// Observed status of a manifest set
///
/// Derives structural equality; "did anything change" checks compare whole
/// containers, which is sound because condition merging pins transition
/// times on no-op merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSetStatus {
    /// Set-level conditions (Applied, Available, ...)
    #[serde(default)]
    pub conditions: Vec<StatusCondition>,

    /// Per-manifest conditions, ordered by application order
    #[serde(default)]
    pub manifests: Vec<ManifestCondition>,
}

/// A set of manifests applied to a managed cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestSet {
    /// Resource name
    pub name: String,

    /// Kubernetes namespace
    pub namespace: String,

    /// Opaque optimistic-concurrency token from the store; `None` until the
    /// resource has been fetched or persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Desired workload
    #[serde(default)]
    pub spec: ManifestSetSpec,

    /// Observed state
    #[serde(default)]
    pub status: ManifestSetStatus,
}

impl ManifestSet {
    /// Create an empty manifest set with no resource version
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            resource_version: None,
            spec: ManifestSetSpec::default(),
            status: ManifestSetStatus::default(),
        }
    }
}
