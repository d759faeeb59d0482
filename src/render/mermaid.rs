//! Mermaid flowchart renderer

use std::fmt::Write;

use crate::graph::DependencyGraph;

use super::Palette;

/// Mermaid identifier for a node: `/`, `-` and `.` become `_`
///
/// Not injective: `Secret/a-b` and `Secret/a.b` share `Secret_a_b`, and
/// Mermaid draws them as one node.
pub fn sanitize_id(id: &str) -> String {
    id.replace(['/', '-', '.'], "_")
}

/// Render the edge-participating part of `graph` as a Mermaid flowchart.
pub fn render_mermaid(graph: &DependencyGraph, palette: &Palette) -> String {
    let nodes = graph.connected_nodes();
    let mut out = String::from("graph LR\n");

    for node in &nodes {
        let _ = writeln!(
            out,
            "  {}[\"{}\"]",
            sanitize_id(node),
            node.replace('"', "#quot;")
        );
    }

    for (parent, edge) in graph.iter_edges() {
        let _ = writeln!(
            out,
            "  {} --> |{}| {}",
            sanitize_id(parent),
            edge.reason,
            sanitize_id(&edge.child_id)
        );
    }

    for category in palette.present_categories(nodes.iter().copied()) {
        let members: Vec<String> = nodes
            .iter()
            .filter(|node| palette.category_of(node) == category)
            .map(|node| sanitize_id(node))
            .collect();
        let _ = writeln!(
            out,
            "  classDef {} fill:{},stroke:#333",
            category.key(),
            palette.color(category)
        );
        let _ = writeln!(out, "  class {} {}", members.join(","), category.key());
    }

    out
}
