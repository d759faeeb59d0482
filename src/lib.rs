//! kubegraph library
//!
//! Builds a directed dependency graph from a snapshot of Kubernetes resources
//! and renders it as DOT, Mermaid or JSON. The binary is a thin layer over
//! this library; tests use it directly.

pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
pub mod render;
pub mod source;

// Re-export commonly used types for convenience
pub use graph::{DependencyGraph, Edge, Reason, build_dependency_graph};
pub use models::{Resource, ResourceKind};
pub use render::{OutputFormat, Palette, render_dot, render_json, render_mermaid};
