//! Inverted label index over pod-carrying resources
//!
//! Maps every `key=value` label pair to the resources carrying it, so
//! selector evaluation starts from the rarest matching label instead of
//! scanning every resource for every selector.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Resource;

use super::selector::{LabelSelector, matches_expressions};

/// Index key for a label pair. Label keys cannot contain `=`.
fn pair_key(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Read-only index built once per graph assembly
#[derive(Debug)]
pub struct LabelIndex<'a> {
    /// Indexed resources in input order
    resources: Vec<&'a Resource>,
    /// `key=value` → ascending positions into `resources`
    by_pair: HashMap<String, Vec<usize>>,
}

impl<'a> LabelIndex<'a> {
    /// Index every Pod and pod-template-bearing controller by its labels
    pub fn build(resources: &'a [Resource]) -> Self {
        let mut indexed = Vec::new();
        let mut by_pair: HashMap<String, Vec<usize>> = HashMap::new();

        for resource in resources {
            if !resource.known_kind().is_some_and(|kind| kind.carries_pods()) {
                continue;
            }
            let position = indexed.len();
            indexed.push(resource);
            for (key, value) in resource.labels() {
                by_pair.entry(pair_key(key, value)).or_default().push(position);
            }
        }

        tracing::debug!(
            "Label index: {} resources under {} label pairs",
            indexed.len(),
            by_pair.len()
        );

        Self {
            resources: indexed,
            by_pair,
        }
    }

    /// Number of indexed resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources whose labels are a superset of `selector`.
    ///
    /// An empty selector matches nothing. Results are in input order.
    pub fn match_labels(&self, selector: &BTreeMap<String, String>) -> Vec<&'a Resource> {
        let mut smallest: Option<&[usize]> = None;
        for (key, value) in selector {
            let Some(candidates) = self.by_pair.get(&pair_key(key, value)) else {
                return Vec::new();
            };
            if smallest.is_none_or(|current| candidates.len() < current.len()) {
                smallest = Some(candidates.as_slice());
            }
        }
        let Some(candidates) = smallest else {
            return Vec::new();
        };

        let candidates = candidates.iter().map(|&position| self.resources[position]);
        if selector.len() == 1 {
            return candidates.collect();
        }
        candidates
            .filter(|resource| {
                let labels = resource.labels();
                selector
                    .iter()
                    .all(|(key, value)| labels.get(key) == Some(value))
            })
            .collect()
    }

    /// Resources matching a full selector (`matchLabels` AND every expression).
    ///
    /// With no `matchLabels` the pool is every indexed resource, one per
    /// identity, so an entirely empty selector selects everything indexed.
    pub fn match_selector(&self, selector: &LabelSelector) -> Vec<&'a Resource> {
        let pool = if selector.match_labels.is_empty() {
            self.unique_resources()
        } else {
            self.match_labels(&selector.match_labels)
        };

        pool.into_iter()
            .filter(|resource| matches_expressions(resource.labels(), &selector.match_expressions))
            .collect()
    }

    /// Indexed resources deduplicated by identity, first occurrence wins
    fn unique_resources(&self) -> Vec<&'a Resource> {
        let mut seen = HashSet::new();
        self.resources
            .iter()
            .copied()
            .filter(|resource| seen.insert(resource.id()))
            .collect()
    }
}
