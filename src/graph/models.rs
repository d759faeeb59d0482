//! Edge data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why one resource depends on another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Reason {
    /// Parent is listed in the child's `metadata.ownerReferences`
    OwnerRef,
    /// Service `spec.selector` matches the child's labels
    Selector,
    /// NetworkPolicy `spec.podSelector` matches the child's labels
    PodSelector,
    /// PodDisruptionBudget `spec.selector` matches the child's labels
    PdbSelector,
    /// Ingress rule path routes to the child Service
    IngressBackend,
    /// Ingress TLS entry terminates with the child Secret
    TlsSecret,
    /// Autoscaler scales the child
    ScaleTargetRef,
    /// Pod template mounts or reads the child Secret
    SecretRef,
    /// Pod template mounts or reads the child ConfigMap
    ConfigMapRef,
    /// Pod template mounts the child PersistentVolumeClaim
    PvcRef,
    /// Pod template runs as the child ServiceAccount
    ServiceAccountName,
}

impl Reason {
    /// Label used on rendered edges
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::OwnerRef => "ownerRef",
            Reason::Selector => "selector",
            Reason::PodSelector => "podSelector",
            Reason::PdbSelector => "pdbSelector",
            Reason::IngressBackend => "ingressBackend",
            Reason::TlsSecret => "tlsSecret",
            Reason::ScaleTargetRef => "scaleTargetRef",
            Reason::SecretRef => "secretRef",
            Reason::ConfigMapRef => "configMapRef",
            Reason::PvcRef => "pvcRef",
            Reason::ServiceAccountName => "serviceAccountName",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Reason::OwnerRef,
            Reason::Selector,
            Reason::PodSelector,
            Reason::PdbSelector,
            Reason::IngressBackend,
            Reason::TlsSecret,
            Reason::ScaleTargetRef,
            Reason::SecretRef,
            Reason::ConfigMapRef,
            Reason::PvcRef,
            Reason::ServiceAccountName,
        ]
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Reason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reason::all()
            .iter()
            .copied()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| format!("Unknown edge reason: {}", s))
    }
}

/// An outgoing edge: the owning parent depends on `child_id` because of `reason`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub child_id: String,
    pub reason: Reason,
}

impl Edge {
    pub fn new(child_id: impl Into<String>, reason: Reason) -> Self {
        Self {
            child_id: child_id.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_labels() {
        for reason in Reason::all() {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json, serde_json::Value::String(reason.as_str().to_string()));
            assert_eq!(reason.as_str().parse::<Reason>(), Ok(*reason));
        }
    }
}
