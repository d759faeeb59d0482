//! Adjacency structure produced by graph assembly
//!
//! Parents are kept in a `BTreeMap`, so iteration is always in lexicographic
//! identity order. Each parent's edge list keeps first-seen order.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use super::models::{Edge, Reason};

/// Directed dependency graph keyed by node identity (`Kind/Name`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, Vec<Edge>>,
}

/// Summary counts for logging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub by_reason: BTreeMap<Reason, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `id` is a key, even if it never gains an edge
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Append an edge under `parent`, creating the parent key if needed
    pub fn add_edge(&mut self, parent: impl Into<String>, edge: Edge) {
        self.adjacency.entry(parent.into()).or_default().push(edge);
    }

    /// Collapse repeated `(child, reason)` pairs per parent, keeping the first
    pub fn dedup_edges(&mut self) {
        for edges in self.adjacency.values_mut() {
            let mut seen = HashSet::new();
            edges.retain(|edge| seen.insert((edge.child_id.clone(), edge.reason)));
        }
    }

    /// Whether `id` is a key of the graph
    pub fn has_key(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Whether `id` is a key or appears as an edge target
    pub fn contains_node(&self, id: &str) -> bool {
        self.has_key(id)
            || self
                .adjacency
                .values()
                .flatten()
                .any(|edge| edge.child_id == id)
    }

    /// Outgoing edges of `parent` (empty for unknown or leaf nodes)
    pub fn edges(&self, parent: &str) -> &[Edge] {
        self.adjacency
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parents with their edge lists, sorted by identity
    pub fn parents(&self) -> impl Iterator<Item = (&str, &[Edge])> {
        self.adjacency
            .iter()
            .map(|(parent, edges)| (parent.as_str(), edges.as_slice()))
    }

    /// Every `(parent, edge)` pair, parents sorted, edges in list order
    pub fn iter_edges(&self) -> impl Iterator<Item = (&str, &Edge)> {
        self.parents()
            .flat_map(|(parent, edges)| edges.iter().map(move |edge| (parent, edge)))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Every node: all keys plus every edge target, sorted
    pub fn nodes(&self) -> BTreeSet<&str> {
        let mut nodes: BTreeSet<&str> = self.adjacency.keys().map(String::as_str).collect();
        nodes.extend(self.iter_edges().map(|(_, edge)| edge.child_id.as_str()));
        nodes
    }

    /// Nodes that are the source or target of at least one edge, sorted
    pub fn connected_nodes(&self) -> BTreeSet<&str> {
        let mut nodes = BTreeSet::new();
        for (parent, edge) in self.iter_edges() {
            nodes.insert(parent);
            nodes.insert(edge.child_id.as_str());
        }
        nodes
    }

    pub fn stats(&self) -> GraphStats {
        let mut by_reason = BTreeMap::new();
        for (_, edge) in self.iter_edges() {
            *by_reason.entry(edge.reason).or_insert(0) += 1;
        }
        GraphStats {
            nodes: self.nodes().len(),
            edges: self.edge_count(),
            by_reason,
        }
    }

    /// Restrict the graph to the weakly-connected component containing `root`.
    ///
    /// Edges are followed in both directions. Returns `None` if `root` is not
    /// a node of this graph.
    pub fn focus(&self, root: &str) -> Option<DependencyGraph> {
        if !self.contains_node(root) {
            return None;
        }

        let mut neighbours: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (parent, edge) in self.iter_edges() {
            neighbours.entry(parent).or_default().push(&edge.child_id);
            neighbours.entry(&edge.child_id).or_default().push(parent);
        }

        let mut component: HashSet<&str> = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            for &next in neighbours.get(node).into_iter().flatten() {
                if component.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let mut focused = DependencyGraph::new();
        for (parent, edges) in self.parents() {
            if !component.contains(parent) {
                continue;
            }
            focused.add_node(parent);
            for edge in edges {
                focused.add_edge(parent, edge.clone());
            }
        }
        Some(focused)
    }
}
