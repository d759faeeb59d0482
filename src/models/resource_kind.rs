//! Resource Kind definitions
//!
//! Centralized enum for the standard Kubernetes kinds the graph engine knows
//! about. Resources of any other kind are still accepted (their kind stays a
//! plain string); this enum only drives kind-specific behaviour such as
//! label indexing, pod template resolution and display grouping.

use std::fmt;
use std::str::FromStr;

use super::category::Category;

/// Enumeration of the standard Kubernetes kinds with special handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    // Workloads
    Pod,
    Deployment,
    DaemonSet,
    StatefulSet,
    ReplicaSet,
    Job,
    CronJob,
    ReplicationController,
    // Networking
    Service,
    Ingress,
    IngressClass,
    NetworkPolicy,
    Endpoints,
    EndpointSlice,
    // Config and storage
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
    PersistentVolume,
    StorageClass,
    // RBAC
    ServiceAccount,
    Role,
    ClusterRole,
    RoleBinding,
    ClusterRoleBinding,
    // Autoscaling and policy
    HorizontalPodAutoscaler,
    VerticalPodAutoscaler,
    PodDisruptionBudget,
    ResourceQuota,
    LimitRange,
    PriorityClass,
}

impl ResourceKind {
    /// Get the kind name as it appears in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "Pod",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::ReplicaSet => "ReplicaSet",
            ResourceKind::Job => "Job",
            ResourceKind::CronJob => "CronJob",
            ResourceKind::ReplicationController => "ReplicationController",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::IngressClass => "IngressClass",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
            ResourceKind::Endpoints => "Endpoints",
            ResourceKind::EndpointSlice => "EndpointSlice",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::PersistentVolume => "PersistentVolume",
            ResourceKind::StorageClass => "StorageClass",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::Role => "Role",
            ResourceKind::ClusterRole => "ClusterRole",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::ClusterRoleBinding => "ClusterRoleBinding",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
            ResourceKind::VerticalPodAutoscaler => "VerticalPodAutoscaler",
            ResourceKind::PodDisruptionBudget => "PodDisruptionBudget",
            ResourceKind::ResourceQuota => "ResourceQuota",
            ResourceKind::LimitRange => "LimitRange",
            ResourceKind::PriorityClass => "PriorityClass",
        }
    }

    /// Try to parse a string into a ResourceKind, returning None if unknown
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all known kinds
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Pod,
            ResourceKind::Deployment,
            ResourceKind::DaemonSet,
            ResourceKind::StatefulSet,
            ResourceKind::ReplicaSet,
            ResourceKind::Job,
            ResourceKind::CronJob,
            ResourceKind::ReplicationController,
            ResourceKind::Service,
            ResourceKind::Ingress,
            ResourceKind::IngressClass,
            ResourceKind::NetworkPolicy,
            ResourceKind::Endpoints,
            ResourceKind::EndpointSlice,
            ResourceKind::ConfigMap,
            ResourceKind::Secret,
            ResourceKind::PersistentVolumeClaim,
            ResourceKind::PersistentVolume,
            ResourceKind::StorageClass,
            ResourceKind::ServiceAccount,
            ResourceKind::Role,
            ResourceKind::ClusterRole,
            ResourceKind::RoleBinding,
            ResourceKind::ClusterRoleBinding,
            ResourceKind::HorizontalPodAutoscaler,
            ResourceKind::VerticalPodAutoscaler,
            ResourceKind::PodDisruptionBudget,
            ResourceKind::ResourceQuota,
            ResourceKind::LimitRange,
            ResourceKind::PriorityClass,
        ]
    }

    /// Whether resources of this kind are pods or embed a pod template.
    ///
    /// Only these kinds are inserted into the label index, so selectors can
    /// never resolve to e.g. a ServiceAccount carrying the same labels.
    pub fn carries_pods(&self) -> bool {
        matches!(
            self,
            ResourceKind::Pod
                | ResourceKind::Deployment
                | ResourceKind::DaemonSet
                | ResourceKind::StatefulSet
                | ResourceKind::ReplicaSet
                | ResourceKind::Job
                | ResourceKind::CronJob
        )
    }

    /// Path from the document root to the pod spec for this kind
    pub fn pod_spec_path(&self) -> Option<&'static [&'static str]> {
        match self {
            ResourceKind::Pod => Some(&["spec"]),
            ResourceKind::Deployment
            | ResourceKind::DaemonSet
            | ResourceKind::StatefulSet
            | ResourceKind::ReplicaSet
            | ResourceKind::Job => Some(&["spec", "template", "spec"]),
            ResourceKind::CronJob => Some(&["spec", "jobTemplate", "spec", "template", "spec"]),
            _ => None,
        }
    }

    /// Built-in display category
    pub fn category(&self) -> Category {
        match self {
            ResourceKind::Pod
            | ResourceKind::Deployment
            | ResourceKind::DaemonSet
            | ResourceKind::StatefulSet
            | ResourceKind::ReplicaSet
            | ResourceKind::Job
            | ResourceKind::CronJob
            | ResourceKind::ReplicationController => Category::Workloads,
            ResourceKind::Service
            | ResourceKind::Ingress
            | ResourceKind::IngressClass
            | ResourceKind::NetworkPolicy
            | ResourceKind::Endpoints
            | ResourceKind::EndpointSlice => Category::Networking,
            ResourceKind::ConfigMap
            | ResourceKind::Secret
            | ResourceKind::PersistentVolumeClaim
            | ResourceKind::PersistentVolume
            | ResourceKind::StorageClass => Category::ConfigStorage,
            ResourceKind::ServiceAccount
            | ResourceKind::Role
            | ResourceKind::ClusterRole
            | ResourceKind::RoleBinding
            | ResourceKind::ClusterRoleBinding => Category::Rbac,
            ResourceKind::HorizontalPodAutoscaler
            | ResourceKind::VerticalPodAutoscaler
            | ResourceKind::PodDisruptionBudget
            | ResourceKind::ResourceQuota
            | ResourceKind::LimitRange
            | ResourceKind::PriorityClass => Category::AutoscalingPolicy,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown resource kind: {}", s))
    }
}
