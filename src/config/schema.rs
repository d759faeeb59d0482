//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::render::OutputFormat;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Format used when `--format` is not given
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Image renderer configuration
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Chart rendering configuration
    #[serde(default)]
    pub chart: ChartConfig,

    /// Kinds removed from the resource collection before the graph is built
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_kinds: Vec<String>,

    /// Fill colour overrides keyed by category key (`workloads`, `networking`,
    /// `config`, `rbac`, `autoscaling`, `other`). Any CSS colour.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, String>,

    /// Category assignments for custom kinds, e.g. `Rollout: workloads`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kind_categories: BTreeMap<String, String>,
}

/// Image renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RendererConfig {
    /// Graphviz executable used for png/svg output
    #[serde(default = "default_dot_binary")]
    pub dot_binary: String,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Helm executable
    #[serde(default = "default_helm_binary")]
    pub helm_binary: String,

    /// Release name passed to `helm template` when none is given
    #[serde(default = "default_release_name")]
    pub release_name: String,
}

// Default value functions
fn default_dot_binary() -> String {
    "dot".to_string()
}

fn default_helm_binary() -> String {
    "helm".to_string()
}

fn default_release_name() -> String {
    "release".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            renderer: RendererConfig::default(),
            chart: ChartConfig::default(),
            exclude_kinds: Vec::new(),
            palette: BTreeMap::new(),
            kind_categories: BTreeMap::new(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            dot_binary: default_dot_binary(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            helm_binary: default_helm_binary(),
            release_name: default_release_name(),
        }
    }
}
