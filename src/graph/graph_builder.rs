//! Graph assembly
//!
//! Seeds one node per resource, builds the label index once, runs every
//! analyzer over every resource in the fixed analyzer order, then collapses
//! duplicate edges.

use std::collections::HashSet;

use crate::models::Resource;

use super::analyzers::{AnalysisContext, Analyzer};
use super::dependency_graph::DependencyGraph;
use super::label_index::LabelIndex;

/// Build the dependency graph for a static snapshot of resources.
///
/// Never fails: references that cannot be interpreted contribute no edge.
pub fn build_dependency_graph(resources: &[Resource]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for resource in resources {
        graph.add_node(resource.id());
    }

    let index = LabelIndex::build(resources);
    let ctx = AnalysisContext {
        resources,
        index: &index,
    };

    for analyzer in Analyzer::all() {
        let before = graph.edge_count();
        for resource in ctx.resources {
            analyzer.analyze(resource, &ctx, &mut graph);
        }
        tracing::debug!(
            "Analyzer {} emitted {} edges",
            analyzer,
            graph.edge_count() - before
        );
    }

    graph.dedup_edges();

    let stats = graph.stats();
    tracing::info!(
        "Built dependency graph: {} resources, {} nodes, {} edges",
        resources.len(),
        stats.nodes,
        stats.edges
    );
    for (reason, count) in &stats.by_reason {
        tracing::info!("  {}: {}", reason, count);
    }

    graph
}

/// Drop resources whose kind is in `excluded` (exact, case-sensitive match)
pub fn exclude_kinds(resources: Vec<Resource>, excluded: &[String]) -> Vec<Resource> {
    if excluded.is_empty() {
        return resources;
    }
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    let before = resources.len();
    let kept: Vec<Resource> = resources
        .into_iter()
        .filter(|resource| !excluded.contains(resource.kind()))
        .collect();
    tracing::debug!("Excluded {} resources by kind", before - kept.len());
    kept
}
