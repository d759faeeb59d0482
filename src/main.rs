//! kubegraph - dependency graphs for Kubernetes resources
//!
//! Reads resources from manifests, a rendered Helm chart or a live cluster,
//! derives who references whom, and prints the graph.

use anyhow::{Context, Result};
use clap::Parser;

use kubegraph::cli::{Cli, Command, handle_config_command, init_logging, run_graph};
use kubegraph::config::ConfigLoader;
use kubegraph::source::{ChartSource, ManifestSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = init_logging(cli.debug)? {
        eprintln!("Debug logging to {}", log_file.display());
    }

    match cli.command {
        Command::Config { subcommand } => handle_config_command(subcommand).await,
        Command::Manifests { paths, render } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let source = ManifestSource::new(paths);
            run_graph(&source, &render, &config).await
        }
        Command::Chart {
            chart,
            release,
            namespace,
            values,
            render,
        } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let source = ChartSource::new(
                config.chart.helm_binary.clone(),
                release.unwrap_or_else(|| config.chart.release_name.clone()),
                chart,
            )
            .with_namespace(namespace)
            .with_values_files(values);
            run_graph(&source, &render, &config).await
        }
        Command::Cluster { namespace, render } => run_cluster(namespace, render).await,
    }
}

#[cfg(feature = "cluster")]
async fn run_cluster(namespace: Option<String>, render: kubegraph::cli::RenderArgs) -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let source = kubegraph::source::ClusterSource::new(namespace);
    run_graph(&source, &render, &config).await
}

#[cfg(not(feature = "cluster"))]
async fn run_cluster(_namespace: Option<String>, _render: kubegraph::cli::RenderArgs) -> Result<()> {
    anyhow::bail!("kubegraph was built without the `cluster` feature")
}
