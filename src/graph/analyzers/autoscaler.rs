//! Scale target edges (HorizontalPodAutoscaler and anything else carrying a
//! `spec.scaleTargetRef`, such as VerticalPodAutoscaler)

use crate::graph::dependency_graph::DependencyGraph;
use crate::graph::models::{Edge, Reason};
use crate::models::{FieldAccess, Resource, node_id};

use super::present;

pub(super) fn analyze(resource: &Resource, graph: &mut DependencyGraph) {
    let kind = present(
        resource,
        resource.non_empty_str_field(&["spec", "scaleTargetRef", "kind"]),
    );
    let name = present(
        resource,
        resource.non_empty_str_field(&["spec", "scaleTargetRef", "name"]),
    );
    if let (Some(kind), Some(name)) = (kind, name) {
        graph.add_edge(
            resource.id(),
            Edge::new(node_id(kind, name), Reason::ScaleTargetRef),
        );
    }
}
