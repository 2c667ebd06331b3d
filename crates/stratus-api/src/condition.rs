//! Condition types shared by set-level and per-manifest status reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known set-level condition types
pub mod condition_types {
    /// Every manifest in the set was applied to the cluster
    pub const APPLIED: &str = "Applied";

    /// Every applied resource reports itself available
    pub const AVAILABLE: &str = "Available";
}

/// Truth value of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl Default for ConditionStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// A named status fact with reason/message/timestamp metadata
///
/// Within one condition list, `condition_type` values are unique. The
/// transition time records when `status` last changed, not when the
/// reason or message text changed; a `None` value means "unset" and is
/// omitted from serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    /// Condition name, unique within a list
    #[serde(rename = "type")]
    pub condition_type: String,

    /// Current truth value
    pub status: ConditionStatus,

    /// When `status` last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason for the current status
    #[serde(default)]
    pub reason: String,

    /// Human-readable detail
    #[serde(default)]
    pub message: String,
}

impl StatusCondition {
    /// Create a condition with an unset transition time
    pub fn new(
        condition_type: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
            last_transition_time: None,
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Set the transition time, consuming self
    pub fn with_transition_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_transition_time = Some(time);
        self
    }
}

/// Identity of the manifest a condition set belongs to
///
/// The ordinal is the manifest's position in the applied workload and
/// locates the entry's slot in a condition list. The remaining fields
/// describe the concrete object and default to empty when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResourceMeta {
    /// Position of the manifest in the workload
    pub ordinal: i32,

    /// API group of the applied object
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// Lowercase API resource identifier (e.g. "deployments")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource: String,

    /// Name of the applied object
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Namespace of the applied object, empty for cluster-scoped kinds
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// Condition set scoped to one manifest in the workload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCondition {
    /// Which manifest these conditions describe
    pub resource_meta: ManifestResourceMeta,

    /// Conditions observed for this manifest
    #[serde(default)]
    pub conditions: Vec<StatusCondition>,
}
