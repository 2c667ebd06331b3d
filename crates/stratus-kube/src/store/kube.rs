//! Cluster-backed manifest set store
//!
//! Talks to the `ManifestSet` resource through the dynamic API, so the
//! driver carries no generated client code. Status writes go through the
//! status subresource with the fetched resourceVersion in the payload,
//! which makes the API server enforce the optimistic-concurrency
//! precondition and answer 409 when a concurrent writer got there first.

use async_trait::async_trait;
use kube::Client;
use kube::api::{Api, DynamicObject, PostParams};
use kube::core::{ApiResource, GroupVersionKind};
use serde_json::json;

use stratus_api::{ManifestSet, ManifestSetSpec, ManifestSetStatus, manifest_set};

use crate::error::{Result, StatusError};
use crate::store::ManifestSetStore;

/// Store driver backed by a live cluster
pub struct KubeManifestSetStore {
    client: Client,
    resource: ApiResource,
}

impl KubeManifestSetStore {
    /// Create a driver from a connected client
    pub fn new(client: Client) -> Self {
        let gvk = GroupVersionKind::gvk(manifest_set::GROUP, manifest_set::VERSION, manifest_set::KIND);
        Self {
            client,
            resource: ApiResource::from_gvk(&gvk),
        }
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }
}

#[async_trait]
impl ManifestSetStore for KubeManifestSetStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<ManifestSet> {
        match self.api(namespace).get_opt(name).await? {
            Some(obj) => from_dynamic(obj),
            None => Err(StatusError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            }),
        }
    }

    async fn update_status(&self, manifest_set: &ManifestSet) -> Result<ManifestSet> {
        let body = status_replace_body(manifest_set)?;
        tracing::debug!(
            namespace = manifest_set.namespace.as_str(),
            name = manifest_set.name.as_str(),
            "replacing manifest set status"
        );
        let obj = self
            .api(&manifest_set.namespace)
            .replace_status(&manifest_set.name, &PostParams::default(), body)
            .await?;
        from_dynamic(obj)
    }
}

/// Map the dynamic representation into the typed resource
fn from_dynamic(obj: DynamicObject) -> Result<ManifestSet> {
    let name = obj.metadata.name.clone().unwrap_or_default();
    let namespace = obj.metadata.namespace.clone().unwrap_or_default();
    let resource_version = obj.metadata.resource_version.clone();

    let spec = match obj.data.get("spec") {
        Some(spec) => serde_json::from_value(spec.clone())?,
        None => ManifestSetSpec::default(),
    };
    let status = match obj.data.get("status") {
        Some(status) => serde_json::from_value(status.clone())?,
        None => ManifestSetStatus::default(),
    };

    Ok(ManifestSet {
        name,
        namespace,
        resource_version,
        spec,
        status,
    })
}

/// Serialize the full-object payload a status replace expects
///
/// The resource version is mandatory here: without it the API server would
/// perform an unconditional write and the optimistic-concurrency contract
/// would silently disappear.
fn status_replace_body(manifest_set: &ManifestSet) -> Result<Vec<u8>> {
    let resource_version = manifest_set.resource_version.as_deref().ok_or_else(|| {
        StatusError::MissingResourceVersion {
            name: manifest_set.name.clone(),
            namespace: manifest_set.namespace.clone(),
        }
    })?;

    let body = json!({
        "apiVersion": manifest_set::API_VERSION,
        "kind": manifest_set::KIND,
        "metadata": {
            "name": manifest_set.name,
            "namespace": manifest_set.namespace,
            "resourceVersion": resource_version,
        },
        "status": manifest_set.status,
    });

    Ok(serde_json::to_vec(&body)?)
}
