//! Graph renderers
//!
//! All textual renderers are pure: the same graph and palette always produce
//! byte-identical output. Node and parent identities are emitted in sorted
//! order and categories in legend order.
//!
//! Structure:
//! - `palette.rs` - category lookup plus fill colours
//! - `dot.rs` - Graphviz DOT
//! - `mermaid.rs` - Mermaid flowchart
//! - `json.rs` - `{nodes, edges}` document
//! - `image.rs` - rasterisation through an external `dot` binary

mod dot;
mod image;
mod json;
mod mermaid;
mod palette;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;

pub use dot::render_dot;
pub use image::render_image;
pub use json::{JsonEdge, JsonGraph, JsonNode, render_json};
pub use mermaid::{render_mermaid, sanitize_id};
pub use palette::Palette;

/// Errors raised while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown category in palette: {0}")]
    UnknownCategory(String),

    #[error("Invalid colour {value:?} for category {category}: {reason}")]
    InvalidColor {
        category: String,
        value: String,
        reason: String,
    },

    #[error("{0} is an image format; render DOT and pass it to render_image")]
    NotTextual(OutputFormat),

    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    ImageFailed {
        binary: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Output formats understood by the CLI
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Dot,
    Mermaid,
    Json,
    Png,
    Svg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Json => "json",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Whether this format is binary image output produced by the layout tool
    pub fn is_image(&self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Svg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(OutputFormat::Dot),
            "mermaid" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(format!(
                "Invalid format: {}. Must be one of: dot, mermaid, json, png, svg",
                s
            )),
        }
    }
}

/// Render `graph` in one of the textual formats
pub fn render_text(
    graph: &DependencyGraph,
    format: OutputFormat,
    palette: &Palette,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Dot => Ok(render_dot(graph, palette)),
        OutputFormat::Mermaid => Ok(render_mermaid(graph, palette)),
        OutputFormat::Json => render_json(graph, palette),
        OutputFormat::Png | OutputFormat::Svg => Err(RenderError::NotTextual(format)),
    }
}
