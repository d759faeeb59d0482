//! Category lookup and fill colours shared by the graphical renderers

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Category, CategoryTable};

use super::RenderError;

/// Immutable colouring scheme handed to every renderer
#[derive(Debug, Clone)]
pub struct Palette {
    table: CategoryTable,
    colors: HashMap<Category, String>,
}

impl Palette {
    /// Built-in colours over the given category table
    pub fn new(table: CategoryTable) -> Self {
        let colors = Category::all()
            .iter()
            .map(|category| (*category, category.default_color().to_string()))
            .collect();
        Self { table, colors }
    }

    /// Apply colour overrides keyed by category key (`workloads`, `rbac`, ...).
    ///
    /// Any CSS colour is accepted and normalised to `#rrggbb`.
    pub fn with_colors(mut self, overrides: &BTreeMap<String, String>) -> Result<Self, RenderError> {
        for (key, value) in overrides {
            let category: Category = key
                .parse()
                .map_err(|_| RenderError::UnknownCategory(key.clone()))?;
            self.colors.insert(category, normalize_color(key, value)?);
        }
        Ok(self)
    }

    pub fn category_of(&self, node_id: &str) -> Category {
        self.table.category_of_node(node_id)
    }

    pub fn color(&self, category: Category) -> &str {
        self.colors
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_color())
    }

    /// Fill colour for a node identity
    pub fn node_color(&self, node_id: &str) -> &str {
        self.color(self.category_of(node_id))
    }

    /// Categories of `nodes`, in legend order
    pub fn present_categories<'n>(&self, nodes: impl IntoIterator<Item = &'n str>) -> Vec<Category> {
        let present: BTreeSet<Category> = nodes.into_iter().map(|node| self.category_of(node)).collect();
        present.into_iter().collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(CategoryTable::standard())
    }
}

fn normalize_color(category: &str, value: &str) -> Result<String, RenderError> {
    let color = csscolorparser::parse(value).map_err(|e| RenderError::InvalidColor {
        category: category.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    let [r, g, b, _] = color.to_rgba8();
    Ok(format!("#{:02x}{:02x}{:02x}", r, g, b))
}
