//! Ingress backend and TLS secret edges

use serde_json::Value;

use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::models::{Edge, Reason};
use crate::models::{FieldAccess, Resource, ResourceKind, node_id};

use super::present;

pub(super) fn analyze(resource: &Resource, graph: &mut DependencyGraph) {
    if resource.known_kind() != Some(ResourceKind::Ingress) {
        return;
    }
    let parent = resource.id();

    // Default backend first, then one per rule path
    for path in [&["spec", "defaultBackend"][..], &["spec", "backend"][..]] {
        let service = present(resource, resource.field(path))
            .and_then(|backend| backend_service(resource, backend));
        if let Some(service) = service {
            graph.add_edge(
                parent.as_str(),
                Edge::new(node_id("Service", service), Reason::IngressBackend),
            );
        }
    }

    for rule in present(resource, resource.array_field(&["spec", "rules"]))
        .into_iter()
        .flatten()
    {
        for http_path in present(resource, rule.array_field(&["http", "paths"]))
            .into_iter()
            .flatten()
        {
            let Some(backend) = present(resource, http_path.field(&["backend"])) else {
                continue;
            };
            if let Some(service) = backend_service(resource, backend) {
                graph.add_edge(
                    parent.as_str(),
                    Edge::new(node_id("Service", service), Reason::IngressBackend),
                );
            }
        }
    }

    for tls in present(resource, resource.array_field(&["spec", "tls"]))
        .into_iter()
        .flatten()
    {
        if let Some(secret) = present(resource, tls.non_empty_str_field(&["secretName"])) {
            graph.add_edge(
                parent.as_str(),
                Edge::new(node_id("Secret", secret), Reason::TlsSecret),
            );
        }
    }
}

/// Service name of a backend in either the `networking.k8s.io/v1` shape
/// (`service.name`) or the legacy `extensions/v1beta1` shape (`serviceName`).
/// Resource backends have neither and yield `None`.
fn backend_service<'v>(resource: &Resource, backend: &'v Value) -> Option<&'v str> {
    present(resource, backend.non_empty_str_field(&["service", "name"]))
        .or_else(|| present(resource, backend.non_empty_str_field(&["serviceName"])))
}
