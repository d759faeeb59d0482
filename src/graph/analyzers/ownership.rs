//! Owner reference edges: owner → owned

use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::models::{Edge, Reason};
use crate::models::Resource;

pub(super) fn analyze(resource: &Resource, graph: &mut DependencyGraph) {
    for owner in resource.owner_references() {
        graph.add_edge(owner.id(), Edge::new(resource.id(), Reason::OwnerRef));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_owner_gets_an_edge() {
        let pod = Resource::from_value(json!({
            "kind": "Pod",
            "metadata": {
                "name": "web-1",
                "ownerReferences": [
                    {"kind": "ReplicaSet", "name": "web-7d9f"},
                    {"kind": "Node", "name": "worker-0"}
                ]
            }
        }))
        .unwrap();

        let mut graph = DependencyGraph::new();
        analyze(&pod, &mut graph);

        assert_eq!(
            graph.edges("ReplicaSet/web-7d9f"),
            &[Edge::new("Pod/web-1", Reason::OwnerRef)]
        );
        assert_eq!(
            graph.edges("Node/worker-0"),
            &[Edge::new("Pod/web-1", Reason::OwnerRef)]
        );
        assert!(graph.edges("Pod/web-1").is_empty());
    }
}
