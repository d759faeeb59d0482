//! Configuration system for kubegraph
//!
//! A single YAML file under the platform config directory, overlaid with
//! environment variables. Command line flags take precedence over both.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ChartConfig, Config, RendererConfig};

use anyhow::Context;

use crate::models::{Category, CategoryTable};
use crate::render::{Palette, RenderError};

/// Build the render palette described by `config`
pub fn build_palette(config: &Config) -> Result<Palette, RenderError> {
    let mut kind_categories = Vec::with_capacity(config.kind_categories.len());
    for (kind, key) in &config.kind_categories {
        let category: Category = key
            .parse()
            .map_err(|_| RenderError::UnknownCategory(key.clone()))?;
        kind_categories.push((kind.clone(), category));
    }
    Palette::new(CategoryTable::with_overrides(kind_categories)).with_colors(&config.palette)
}

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultFormat" => Ok(config.default_format.to_string()),
        "renderer.dotBinary" => Ok(config.renderer.dot_binary.clone()),
        "chart.helmBinary" => Ok(config.chart.helm_binary.clone()),
        "chart.releaseName" => Ok(config.chart.release_name.clone()),
        "excludeKinds" => Ok(config.exclude_kinds.join(",")),
        _ => {
            if let Some(category) = key.strip_prefix("palette.") {
                return Ok(config.palette.get(category).cloned().unwrap_or_else(|| {
                    category
                        .parse::<Category>()
                        .map(|c| c.default_color().to_string())
                        .unwrap_or_default()
                }));
            }
            if let Some(kind) = key.strip_prefix("kindCategories.") {
                return Ok(config.kind_categories.get(kind).cloned().unwrap_or_else(|| {
                    CategoryTable::standard().category_of_kind(kind).key().to_string()
                }));
            }
            Err(anyhow::anyhow!("Unknown configuration key: {}", key))
        }
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "defaultFormat" => {
            config.default_format = value
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("defaultFormat must be one of dot, mermaid, json, png, svg")?;
        }
        "renderer.dotBinary" => {
            config.renderer.dot_binary = value.to_string();
        }
        "chart.helmBinary" => {
            config.chart.helm_binary = value.to_string();
        }
        "chart.releaseName" => {
            config.chart.release_name = value.to_string();
        }
        "excludeKinds" => {
            // Parse as YAML array or comma-separated list
            config.exclude_kinds = if value.trim_start().starts_with('[') {
                serde_yaml::from_str(value)
                    .context("excludeKinds must be a YAML array (e.g., ['Secret', 'Event'])")?
            } else {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            };
        }
        _ => {
            if let Some(category) = key.strip_prefix("palette.") {
                category
                    .parse::<Category>()
                    .map_err(|e| anyhow::anyhow!(e))?;
                if value.is_empty() {
                    config.palette.remove(category);
                } else {
                    csscolorparser::parse(value)
                        .with_context(|| format!("{} is not a valid colour", value))?;
                    config.palette.insert(category.to_string(), value.to_string());
                }
                return Ok(());
            }
            if let Some(kind) = key.strip_prefix("kindCategories.") {
                if value.is_empty() {
                    config.kind_categories.remove(kind);
                } else {
                    value
                        .parse::<Category>()
                        .map_err(|e| anyhow::anyhow!(e))?;
                    config
                        .kind_categories
                        .insert(kind.to_string(), value.to_string());
                }
                return Ok(());
            }
            return Err(anyhow::anyhow!("Unknown configuration key: {}", key));
        }
    }

    Ok(())
}
