//! Live cluster listing
//!
//! Lists a fixed set of standard namespaced kinds through the Kubernetes API.
//! Uses the default kubeconfig loading strategy:
//! 1. In-cluster config (if running in a pod)
//! 2. KUBECONFIG environment variable
//! 3. ~/.kube/config
//!
//! Kinds the caller is not allowed to list are skipped with a warning so a
//! restricted account still gets a partial graph.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    ConfigMap, PersistentVolumeClaim, Pod, Secret, Service, ServiceAccount,
};
use k8s_openapi::api::networking::v1::{Ingress, NetworkPolicy};
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use kube::api::ListParams;
use kube::{Api, Client, Config};

use crate::models::{Resource, ResourceKind};

use super::{ResourceSource, SourceError};

/// Kinds listed from the cluster, in listing order
pub const LISTED_KINDS: [ResourceKind; 16] = [
    ResourceKind::Pod,
    ResourceKind::Deployment,
    ResourceKind::DaemonSet,
    ResourceKind::StatefulSet,
    ResourceKind::ReplicaSet,
    ResourceKind::Job,
    ResourceKind::CronJob,
    ResourceKind::Service,
    ResourceKind::Ingress,
    ResourceKind::NetworkPolicy,
    ResourceKind::PodDisruptionBudget,
    ResourceKind::HorizontalPodAutoscaler,
    ResourceKind::ConfigMap,
    ResourceKind::Secret,
    ResourceKind::PersistentVolumeClaim,
    ResourceKind::ServiceAccount,
];

/// Resources listed from the current kubeconfig context
#[derive(Debug, Clone, Default)]
pub struct ClusterSource {
    /// `None` lists across all namespaces
    namespace: Option<String>,
}

impl ClusterSource {
    pub fn new(namespace: Option<String>) -> Self {
        Self { namespace }
    }

    async fn client(&self) -> Result<Client, SourceError> {
        let config = Config::infer()
            .await
            .map_err(|e| SourceError::ClusterConfig(e.to_string()))?;
        tracing::debug!("Connecting to cluster at {}", config.cluster_url);
        Ok(Client::try_from(config)?)
    }

    async fn list_kind(&self, client: &Client, kind: ResourceKind) -> Result<Vec<Resource>, SourceError> {
        let namespace = self.namespace.as_deref();

        macro_rules! list_resources {
            ($type:ty) => {{
                let api: Api<$type> = match namespace {
                    Some(namespace) => Api::namespaced(client.clone(), namespace),
                    None => Api::all(client.clone()),
                };
                let list = api.list(&ListParams::default()).await?;
                list.items
                    .iter()
                    .filter_map(|obj| to_resource(kind, serde_json::to_value(obj)))
                    .collect()
            }};
        }

        let resources = match kind {
            ResourceKind::Pod => list_resources!(Pod),
            ResourceKind::Deployment => list_resources!(Deployment),
            ResourceKind::DaemonSet => list_resources!(DaemonSet),
            ResourceKind::StatefulSet => list_resources!(StatefulSet),
            ResourceKind::ReplicaSet => list_resources!(ReplicaSet),
            ResourceKind::Job => list_resources!(Job),
            ResourceKind::CronJob => list_resources!(CronJob),
            ResourceKind::Service => list_resources!(Service),
            ResourceKind::Ingress => list_resources!(Ingress),
            ResourceKind::NetworkPolicy => list_resources!(NetworkPolicy),
            ResourceKind::PodDisruptionBudget => list_resources!(PodDisruptionBudget),
            ResourceKind::HorizontalPodAutoscaler => list_resources!(HorizontalPodAutoscaler),
            ResourceKind::ConfigMap => list_resources!(ConfigMap),
            ResourceKind::Secret => list_resources!(Secret),
            ResourceKind::PersistentVolumeClaim => list_resources!(PersistentVolumeClaim),
            ResourceKind::ServiceAccount => list_resources!(ServiceAccount),
            other => {
                tracing::debug!("{} is not listed from the cluster", other);
                Vec::new()
            }
        };
        Ok(resources)
    }
}

/// Typed objects serialise with `apiVersion` and `kind`, so they decode like
/// any manifest document.
fn to_resource(kind: ResourceKind, value: serde_json::Result<serde_json::Value>) -> Option<Resource> {
    let value = value
        .map_err(|e| tracing::warn!("Failed to serialize {}: {}", kind, e))
        .ok()?;
    Resource::from_value(value)
        .map_err(|e| tracing::warn!("Skipping {}: {}", kind, e))
        .ok()
}

#[async_trait]
impl ResourceSource for ClusterSource {
    async fn load(&self) -> Result<Vec<Resource>, SourceError> {
        let client = self.client().await?;
        let mut resources = Vec::new();
        for kind in LISTED_KINDS {
            match self.list_kind(&client, kind).await {
                Ok(listed) => {
                    tracing::debug!("Listed {} {} resources", listed.len(), kind);
                    resources.extend(listed);
                }
                Err(e) => tracing::warn!("Skipping {}: {}", kind, e),
            }
        }
        Ok(resources)
    }

    fn describe(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("cluster namespace {}", namespace),
            None => "cluster (all namespaces)".to_string(),
        }
    }
}
