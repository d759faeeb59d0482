//! Configuration loading and validation
//!
//! Precedence order (highest to lowest):
//! 1. Command line flags (applied by the caller)
//! 2. Environment variable overrides
//! 3. Config file
//! 4. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file (if any) with environment overrides applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load `path` (if it exists) with environment overrides applied
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };
        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate a config file
    ///
    /// This performs strict validation - it will fail on:
    /// - Invalid YAML syntax or value types
    /// - Unknown palette categories or unparseable colours
    /// - Unknown categories in `kindCategories`
    pub fn validate(path: &Path) -> Result<()> {
        let config = Self::load_from(path)?;
        super::build_palette(&config).context("Invalid palette configuration")?;
        if let Some(kind) = config.exclude_kinds.iter().find(|kind| kind.trim().is_empty()) {
            return Err(anyhow::anyhow!("excludeKinds contains an empty kind: {:?}", kind));
        }
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // KUBEGRAPH_FORMAT override
        if let Ok(format) = std::env::var("KUBEGRAPH_FORMAT") {
            match format.parse() {
                Ok(format) => config.default_format = format,
                Err(e) => tracing::warn!("Ignoring KUBEGRAPH_FORMAT: {}", e),
            }
        }

        // KUBEGRAPH_DOT_BINARY override
        if let Ok(dot_binary) = std::env::var("KUBEGRAPH_DOT_BINARY") {
            config.renderer.dot_binary = dot_binary;
        }

        // KUBEGRAPH_HELM_BINARY override
        if let Ok(helm_binary) = std::env::var("KUBEGRAPH_HELM_BINARY") {
            config.chart.helm_binary = helm_binary;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(&temp.path().join("config.yaml")).unwrap();
        assert_eq!(config.chart.release_name, "release");
    }

    #[test]
    fn test_save_and_reload() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.default_format = OutputFormat::Json;
        config.exclude_kinds = vec!["Secret".to_string()];
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        std::fs::write(&path, "palette:\n  workloads: steelblue\n").unwrap();
        assert!(ConfigLoader::validate(&path).is_ok());

        std::fs::write(&path, "palette:\n  workloads: not-a-colour\n").unwrap();
        assert!(ConfigLoader::validate(&path).is_err());

        std::fs::write(&path, "kindCategories:\n  Rollout: gadgets\n").unwrap();
        assert!(ConfigLoader::validate(&path).is_err());

        std::fs::write(&path, "defaultFormat: [dot\n").unwrap();
        assert!(ConfigLoader::validate(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // Only this test touches these variables.
        unsafe {
            std::env::set_var("KUBEGRAPH_DOT_BINARY", "/opt/graphviz/bin/dot");
            std::env::set_var("KUBEGRAPH_HELM_BINARY", "helm3");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.renderer.dot_binary, "/opt/graphviz/bin/dot");
        assert_eq!(config.chart.helm_binary, "helm3");

        // SAFETY: see above
        unsafe {
            std::env::remove_var("KUBEGRAPH_DOT_BINARY");
            std::env::remove_var("KUBEGRAPH_HELM_BINARY");
        }
    }
}
