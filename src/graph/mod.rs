//! Dependency graph construction
//!
//! Turns a flat resource collection into a directed graph of references:
//! who owns, selects, routes to, scales or mounts whom.

mod analyzers;
mod dependency_graph;
mod graph_builder;
mod label_index;
mod models;
mod selector;

pub use analyzers::{AnalysisContext, Analyzer};
pub use dependency_graph::{DependencyGraph, GraphStats};
pub use graph_builder::{build_dependency_graph, exclude_kinds};
pub use label_index::LabelIndex;
pub use models::{Edge, Reason};
pub use selector::{LabelSelector, Operator, Requirement, matches_expressions};
