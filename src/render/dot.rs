//! Graphviz DOT renderer

use std::fmt::Write;

use crate::graph::DependencyGraph;
use crate::models::Category;

use super::Palette;

/// Render the edge-participating part of `graph` as DOT.
///
/// Isolated nodes are left out. A legend of the categories actually drawn is
/// pinned to the sink rank.
pub fn render_dot(graph: &DependencyGraph, palette: &Palette) -> String {
    let nodes = graph.connected_nodes();
    let mut out = String::new();

    out.push_str("digraph G {\n");
    out.push_str("  rankdir=\"LR\";\n");
    out.push_str("  node [shape=box, style=filled];\n");

    for node in &nodes {
        let _ = writeln!(
            out,
            "  {} [fillcolor=\"{}\"];",
            quote(node),
            palette.node_color(node)
        );
    }

    for (parent, edge) in graph.iter_edges() {
        let _ = writeln!(
            out,
            "  {} -> {} [label=\"{}\"];",
            quote(parent),
            quote(&edge.child_id),
            edge.reason
        );
    }

    let categories = palette.present_categories(nodes.iter().copied());
    if !categories.is_empty() {
        write_legend(&mut out, &categories, palette);
    }

    out.push_str("}\n");
    out
}

fn write_legend(out: &mut String, categories: &[Category], palette: &Palette) {
    out.push_str("  legend [shape=plaintext, fillcolor=\"#ffffff\", label=<\n");
    out.push_str("    <TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">\n");
    out.push_str("      <TR><TD COLSPAN=\"2\"><B>Legend</B></TD></TR>\n");
    for category in categories {
        let _ = writeln!(
            out,
            "      <TR><TD BGCOLOR=\"{}\">&nbsp;&nbsp;&nbsp;</TD><TD>{}</TD></TR>",
            palette.color(*category),
            category.label().replace('&', "&amp;")
        );
    }
    out.push_str("    </TABLE>\n");
    out.push_str("  >];\n");
    out.push_str("  { rank=sink; legend; }\n");
}

/// Double-quoted DOT identifier
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
