//! In-memory manifest set store for testing
//!
//! This driver keeps manifest sets in memory with the same
//! optimistic-concurrency contract the cluster driver has: resource
//! versions are a monotonic counter rendered as strings, and a status
//! write whose version no longer matches the stored one fails with a
//! conflict. Useful for unit tests without a Kubernetes cluster.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use stratus_api::ManifestSet;

use crate::error::{Result, StatusError};
use crate::store::ManifestSetStore;

/// In-memory store driver for testing
#[derive(Clone, Default)]
pub struct MockManifestSetStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// Storage: namespace -> name -> stored set
    sets: HashMap<String, HashMap<String, ManifestSet>>,
    /// Monotonic resource-version counter shared by all stored sets
    next_version: u64,
    /// Artificial conflicts still to serve on upcoming status writes
    injected_conflicts: usize,
    /// Track operation counts for assertions
    counts: OperationCounts,
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone)]
pub struct OperationCounts {
    pub gets: usize,
    pub status_updates: usize,
    pub conflicts: usize,
}

impl MockManifestSetStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-populated manifest sets
    ///
    /// Each set is assigned a fresh resource version, overriding whatever
    /// version the input carried.
    pub fn with_sets(sets: Vec<ManifestSet>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write().unwrap();
            for mut set in sets {
                inner.next_version += 1;
                set.resource_version = Some(inner.next_version.to_string());
                inner
                    .sets
                    .entry(set.namespace.clone())
                    .or_default()
                    .insert(set.name.clone(), set);
            }
        }
        store
    }

    /// Queue artificial version conflicts for upcoming status writes
    ///
    /// The next `count` calls to `update_status` fail with a conflict
    /// without touching stored data, regardless of the version they carry.
    pub fn inject_conflicts(&self, count: usize) {
        self.inner.write().unwrap().injected_conflicts += count;
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.inner.read().unwrap().counts.clone()
    }

    /// Current stored copy, bypassing operation counts
    pub fn stored(&self, namespace: &str, name: &str) -> Option<ManifestSet> {
        let inner = self.inner.read().unwrap();
        inner.sets.get(namespace).and_then(|sets| sets.get(name)).cloned()
    }
}

#[async_trait]
impl ManifestSetStore for MockManifestSetStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<ManifestSet> {
        let mut inner = self.inner.write().unwrap();
        inner.counts.gets += 1;

        inner
            .sets
            .get(namespace)
            .and_then(|sets| sets.get(name))
            .cloned()
            .ok_or_else(|| StatusError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }

    async fn update_status(&self, manifest_set: &ManifestSet) -> Result<ManifestSet> {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;
        inner.counts.status_updates += 1;

        if inner.injected_conflicts > 0 {
            inner.injected_conflicts -= 1;
            inner.counts.conflicts += 1;
            return Err(StatusError::Conflict {
                name: manifest_set.name.clone(),
                namespace: manifest_set.namespace.clone(),
            });
        }

        let expected =
            manifest_set
                .resource_version
                .as_deref()
                .ok_or_else(|| StatusError::MissingResourceVersion {
                    name: manifest_set.name.clone(),
                    namespace: manifest_set.namespace.clone(),
                })?;

        let stored = inner
            .sets
            .get_mut(&manifest_set.namespace)
            .and_then(|sets| sets.get_mut(&manifest_set.name))
            .ok_or_else(|| StatusError::NotFound {
                name: manifest_set.name.clone(),
                namespace: manifest_set.namespace.clone(),
            })?;

        if stored.resource_version.as_deref() != Some(expected) {
            inner.counts.conflicts += 1;
            return Err(StatusError::Conflict {
                name: manifest_set.name.clone(),
                namespace: manifest_set.namespace.clone(),
            });
        }

        inner.next_version += 1;
        stored.status = manifest_set.status.clone();
        stored.resource_version = Some(inner.next_version.to_string());
        Ok(stored.clone())
    }
}
