//! Reference analyzers
//!
//! Each analyzer discovers one category of inter-resource reference and
//! appends edges to the graph. They are independent of one another; the fixed
//! order in [`Analyzer::all`] only determines the first-seen order of edges.

mod autoscaler;
mod ingress;
mod label_selector;
mod ownership;
mod pod_template;

use std::fmt;

use crate::models::{FieldError, Resource};

use super::dependency_graph::DependencyGraph;
use super::label_index::LabelIndex;

/// Shared read-only inputs for one assembly run
pub struct AnalysisContext<'a> {
    /// The full resource collection
    pub resources: &'a [Resource],
    /// Label index over `resources`
    pub index: &'a LabelIndex<'a>,
}

/// The reference analyzers, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    Ownership,
    LabelSelector,
    Ingress,
    Autoscaler,
    PodTemplate,
}

impl Analyzer {
    /// Every analyzer in the order graph assembly runs them
    pub fn all() -> &'static [Self] {
        &[
            Analyzer::Ownership,
            Analyzer::LabelSelector,
            Analyzer::Ingress,
            Analyzer::Autoscaler,
            Analyzer::PodTemplate,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analyzer::Ownership => "ownership",
            Analyzer::LabelSelector => "label-selector",
            Analyzer::Ingress => "ingress",
            Analyzer::Autoscaler => "autoscaler",
            Analyzer::PodTemplate => "pod-template",
        }
    }

    /// Discover this analyzer's references from `resource` and add them to `graph`
    pub fn analyze(&self, resource: &Resource, ctx: &AnalysisContext<'_>, graph: &mut DependencyGraph) {
        match self {
            Analyzer::Ownership => ownership::analyze(resource, graph),
            Analyzer::LabelSelector => label_selector::analyze(resource, ctx.index, graph),
            Analyzer::Ingress => ingress::analyze(resource, graph),
            Analyzer::Autoscaler => autoscaler::analyze(resource, graph),
            Analyzer::PodTemplate => pod_template::analyze(resource, graph),
        }
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Turn a field lookup into "use it or skip it".
///
/// Absence yields `None` silently; a shape mismatch yields `None` and a
/// debug log naming the resource, so only that one reference is lost.
fn present<T>(resource: &Resource, lookup: Result<Option<T>, FieldError>) -> Option<T> {
    match lookup {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("{}: skipping reference: {}", resource.id(), e);
            None
        }
    }
}
