//! Error types for stratus-kube

use thiserror::Error;

/// Result type for stratus-kube operations
pub type Result<T> = std::result::Result<T, StatusError>;

/// Errors that can occur while reconciling manifest set status
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatusError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Manifest set does not exist
    #[error("manifest set '{name}' not found in namespace '{namespace}'")]
    NotFound { name: String, namespace: String },

    /// Conditional write lost against a newer stored version
    #[error("stale resource version for manifest set '{namespace}/{name}'")]
    Conflict { name: String, namespace: String },

    /// Conditional write attempted without a resource version token
    #[error("manifest set '{namespace}/{name}' carries no resource version to write against")]
    MissingResourceVersion { name: String, namespace: String },

    /// Caller-supplied status mutation reported an error
    #[error("status mutation failed: {0}")]
    Mutation(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StatusError {
    fn from(e: serde_json::Error) -> Self {
        StatusError::Serialization(e.to_string())
    }
}

impl StatusError {
    /// Check if this is a version conflict (409), recoverable by refetching
    pub fn is_conflict(&self) -> bool {
        matches!(self, StatusError::Conflict { .. })
            || matches!(self, StatusError::Api(kube::Error::Api(resp)) if resp.code == 409)
    }

    /// Check if this is a not-found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, StatusError::NotFound { .. })
            || matches!(self, StatusError::Api(kube::Error::Api(resp)) if resp.code == 404)
    }
}
