//! JSON node/edge document

use serde::{Deserialize, Serialize};

use crate::graph::{DependencyGraph, Reason};

use super::{Palette, RenderError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonNode {
    pub id: String,
    /// Category key
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEdge {
    pub from: String,
    pub to: String,
    pub reason: Reason,
}

/// Serialised graph. Unlike the drawings it includes isolated nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonGraph {
    pub nodes: Vec<JsonNode>,
    pub edges: Vec<JsonEdge>,
}

impl JsonGraph {
    pub fn from_graph(graph: &DependencyGraph, palette: &Palette) -> Self {
        let nodes = graph
            .nodes()
            .into_iter()
            .map(|id| JsonNode {
                id: id.to_string(),
                group: palette.category_of(id).key().to_string(),
            })
            .collect();
        let edges = graph
            .iter_edges()
            .map(|(parent, edge)| JsonEdge {
                from: parent.to_string(),
                to: edge.child_id.clone(),
                reason: edge.reason,
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Pretty-printed JSON with nodes sorted by identity and edges by parent
pub fn render_json(graph: &DependencyGraph, palette: &Palette) -> Result<String, RenderError> {
    let mut out = serde_json::to_string_pretty(&JsonGraph::from_graph(graph, palette))?;
    out.push('\n');
    Ok(out)
}
