//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use tokio::io::AsyncWriteExt;

use crate::config::{self, Config, ConfigLoader, paths};
use crate::graph::{build_dependency_graph, exclude_kinds};
use crate::render::{render_dot, render_image, render_text};
use crate::source::ResourceSource;

use super::RenderArgs;

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "defaultFormat", "palette.workloads")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "defaultFormat", "palette.workloads")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub async fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            // Start from the file alone so environment overrides are not persisted
            let path = paths::root_config_path();
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                ConfigLoader::load_defaults()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate(&paths::root_config_path()) {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Load, assemble and render: the bytes that a graph command outputs
pub async fn render_graph(
    source: &dyn ResourceSource,
    args: &RenderArgs,
    config: &Config,
) -> Result<Vec<u8>> {
    let format = args.format.unwrap_or(config.default_format);
    if format.is_image() && args.output.is_none() {
        anyhow::bail!("{} output is binary; write it to a file with --output", format);
    }
    let palette = config::build_palette(config).context("Invalid palette configuration")?;

    tracing::info!("Loading resources from {}", source.describe());
    let resources = source
        .load()
        .await
        .with_context(|| format!("Failed to load {}", source.describe()))?;

    let mut excluded = config.exclude_kinds.clone();
    excluded.extend(args.exclude_kinds.iter().cloned());
    let resources = exclude_kinds(resources, &excluded);

    let mut graph = build_dependency_graph(&resources);
    if let Some(focus) = &args.focus {
        graph = graph
            .focus(focus)
            .with_context(|| format!("Focus node {} is not in the graph", focus))?;
    }

    if format.is_image() {
        let dot = render_dot(&graph, &palette);
        return render_image(&dot, format, &config.renderer.dot_binary)
            .await
            .context("Failed to render image");
    }
    Ok(render_text(&graph, format, &palette)?.into_bytes())
}

/// Run a graph command and write its output to `--output` or stdout
pub async fn run_graph(source: &dyn ResourceSource, args: &RenderArgs, config: &Config) -> Result<()> {
    let bytes = render_graph(source, args, config).await?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&bytes)
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
