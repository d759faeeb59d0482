//! Display categories for resource kinds
//!
//! Categories only affect how renderers colour and group nodes; they have no
//! influence on which edges are discovered.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::resource_kind::ResourceKind;

/// Display grouping of resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Workloads,
    Networking,
    ConfigStorage,
    Rbac,
    AutoscalingPolicy,
    Other,
}

impl Category {
    /// Stable key used in JSON output, style classes and configuration
    pub fn key(&self) -> &'static str {
        match self {
            Category::Workloads => "workloads",
            Category::Networking => "networking",
            Category::ConfigStorage => "config",
            Category::Rbac => "rbac",
            Category::AutoscalingPolicy => "autoscaling",
            Category::Other => "other",
        }
    }

    /// Human readable label for legends
    pub fn label(&self) -> &'static str {
        match self {
            Category::Workloads => "Workloads",
            Category::Networking => "Networking",
            Category::ConfigStorage => "Config & Storage",
            Category::Rbac => "RBAC",
            Category::AutoscalingPolicy => "Autoscaling & Policy",
            Category::Other => "Other",
        }
    }

    /// All categories in legend order
    pub fn all() -> &'static [Self] {
        &[
            Category::Workloads,
            Category::Networking,
            Category::ConfigStorage,
            Category::Rbac,
            Category::AutoscalingPolicy,
            Category::Other,
        ]
    }

    /// Built-in fill colour
    pub fn default_color(&self) -> &'static str {
        match self {
            Category::Workloads => "#a6cee3",
            Category::Networking => "#b2df8a",
            Category::ConfigStorage => "#fdbf6f",
            Category::Rbac => "#cab2d6",
            Category::AutoscalingPolicy => "#fb9a99",
            Category::Other => "#d9d9d9",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|category| category.key() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Immutable kind → category lookup.
///
/// Built once (optionally with user overrides for custom kinds) and passed by
/// reference to the renderers. Kinds absent from the table fall into
/// [`Category::Other`].
#[derive(Debug, Clone)]
pub struct CategoryTable {
    by_kind: HashMap<String, Category>,
}

impl CategoryTable {
    /// Table covering the standard kinds
    pub fn standard() -> Self {
        let by_kind = ResourceKind::all()
            .iter()
            .map(|kind| (kind.as_str().to_string(), kind.category()))
            .collect();
        Self { by_kind }
    }

    /// Standard table with additional or replacement kind assignments
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, Category)>,
    {
        let mut table = Self::standard();
        table.by_kind.extend(overrides);
        table
    }

    /// Category for a kind name
    pub fn category_of_kind(&self, kind: &str) -> Category {
        self.by_kind.get(kind).copied().unwrap_or(Category::Other)
    }

    /// Category for a node identity of the form `Kind/Name`
    pub fn category_of_node(&self, node_id: &str) -> Category {
        let kind = node_id.split_once('/').map(|(kind, _)| kind).unwrap_or(node_id);
        self.category_of_kind(kind)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}
