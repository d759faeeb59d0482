//! Selector edges from Services, NetworkPolicies and PodDisruptionBudgets
//!
//! - Service: `spec.selector` is a flat label map (no expressions)
//! - NetworkPolicy: `spec.podSelector` is a full label selector
//! - PodDisruptionBudget: `spec.selector` is a full label selector

use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::label_index::LabelIndex;
use crate::graph::models::{Edge, Reason};
use crate::graph::selector::LabelSelector;
use crate::models::{FieldAccess, Resource, ResourceKind};

use super::present;

pub(super) fn analyze(resource: &Resource, index: &LabelIndex<'_>, graph: &mut DependencyGraph) {
    let matches = match resource.known_kind() {
        Some(ResourceKind::Service) => {
            // A Service without a selector (e.g. ExternalName) targets nothing
            let Some(selector) = present(resource, resource.string_map_field(&["spec", "selector"]))
            else {
                return;
            };
            (index.match_labels(&selector), Reason::Selector)
        }
        Some(ResourceKind::NetworkPolicy) => {
            let Some(selector) = structured_selector(resource, &["spec", "podSelector"]) else {
                return;
            };
            (index.match_selector(&selector), Reason::PodSelector)
        }
        Some(ResourceKind::PodDisruptionBudget) => {
            let Some(selector) = structured_selector(resource, &["spec", "selector"]) else {
                return;
            };
            (index.match_selector(&selector), Reason::PdbSelector)
        }
        _ => return,
    };

    let (targets, reason) = matches;
    let parent = resource.id();
    for target in targets {
        graph.add_edge(parent.as_str(), Edge::new(target.id(), reason));
    }
}

fn structured_selector(resource: &Resource, path: &[&str]) -> Option<LabelSelector> {
    let value = present(resource, resource.field(path))?;
    present(resource, LabelSelector::from_value(value).map(Some))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn workloads() -> Vec<Resource> {
        [
            ("Deployment", "web", json!({"app": "web", "env": "prod"})),
            ("Deployment", "api", json!({"app": "api", "env": "prod"})),
            ("Pod", "debug", json!({"app": "web", "env": "dev"})),
        ]
        .into_iter()
        .map(|(kind, name, labels)| {
            Resource::from_value(json!({"kind": kind, "metadata": {"name": name, "labels": labels}}))
                .unwrap()
        })
        .collect()
    }

    fn run(subject: serde_json::Value) -> DependencyGraph {
        let resources = workloads();
        let index = LabelIndex::build(&resources);
        let subject = Resource::from_value(subject).unwrap();
        let mut graph = DependencyGraph::new();
        analyze(&subject, &index, &mut graph);
        graph
    }

    #[test]
    fn test_service_selector() {
        let graph = run(json!({
            "kind": "Service",
            "metadata": {"name": "web"},
            "spec": {"selector": {"app": "web"}}
        }));
        assert_eq!(
            graph.edges("Service/web"),
            &[
                Edge::new("Deployment/web", Reason::Selector),
                Edge::new("Pod/debug", Reason::Selector)
            ]
        );
    }

    #[test]
    fn test_service_without_selector() {
        let graph = run(json!({
            "kind": "Service",
            "metadata": {"name": "external"},
            "spec": {"type": "ExternalName", "externalName": "db.example.com"}
        }));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_network_policy_expressions() {
        let graph = run(json!({
            "kind": "NetworkPolicy",
            "metadata": {"name": "prod-only"},
            "spec": {"podSelector": {"matchExpressions": [
                {"key": "env", "operator": "In", "values": ["prod"]}
            ]}}
        }));
        assert_eq!(
            graph.edges("NetworkPolicy/prod-only"),
            &[
                Edge::new("Deployment/web", Reason::PodSelector),
                Edge::new("Deployment/api", Reason::PodSelector)
            ]
        );
    }

    #[test]
    fn test_pdb_match_labels_and_expressions() {
        let graph = run(json!({
            "kind": "PodDisruptionBudget",
            "metadata": {"name": "web"},
            "spec": {"selector": {
                "matchLabels": {"app": "web"},
                "matchExpressions": [{"key": "env", "operator": "NotIn", "values": ["dev"]}]
            }}
        }));
        assert_eq!(
            graph.edges("PodDisruptionBudget/web"),
            &[Edge::new("Deployment/web", Reason::PdbSelector)]
        );
    }

    #[test]
    fn test_malformed_selector_is_skipped() {
        let graph = run(json!({
            "kind": "PodDisruptionBudget",
            "metadata": {"name": "broken"},
            "spec": {"selector": "app=web"}
        }));
        assert_eq!(graph.edge_count(), 0);
    }
}
