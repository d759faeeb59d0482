//! CLI command handling module
//!
//! Handles argument parsing, logging setup and all subcommands.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::render::OutputFormat;

pub use commands::{ConfigSubcommand, handle_config_command, render_graph, run_graph};
pub use logging::init_logging;

/// Derive dependency graphs between Kubernetes resources
#[derive(Parser, Debug)]
#[command(name = "kubegraph", version)]
#[command(about = "Derive and render dependency graphs between Kubernetes resources", long_about = None)]
pub struct Cli {
    /// Enable debug logging to a temp file
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Graph manifests from files, directories or stdin (`-`)
    Manifests {
        /// Manifest files or directories (searched recursively for .yaml/.yml/.json)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Graph a Helm chart rendered with `helm template`
    Chart {
        /// Chart reference (path, repo/name or OCI URL)
        chart: String,

        /// Release name (defaults to chart.releaseName from config)
        #[arg(long)]
        release: Option<String>,

        /// Namespace passed to helm
        #[arg(long, short = 'n')]
        namespace: Option<String>,

        /// Values files passed to helm
        #[arg(long = "values", short = 'f')]
        values: Vec<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Graph resources listed from the current kubeconfig context
    Cluster {
        /// Namespace to list (all namespaces when omitted)
        #[arg(long, short = 'n')]
        namespace: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Options shared by every graph command
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output format (defaults to defaultFormat from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write to this file instead of stdout (required for png/svg)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only render the connected component containing this node (Kind/Name)
    #[arg(long)]
    pub focus: Option<String>,

    /// Drop resources of these kinds before building the graph
    #[arg(long = "exclude-kind", value_delimiter = ',')]
    pub exclude_kinds: Vec<String>,
}
