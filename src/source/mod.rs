//! Resource sources
//!
//! Everything that produces the resource collection the graph is built from:
//! manifest files, a rendered Helm chart, or a live cluster. All of them
//! implement [`ResourceSource`] so the command pipeline does not care where
//! resources came from.

pub mod chart;
#[cfg(feature = "cluster")]
pub mod cluster;
pub mod manifest;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::Resource;

pub use chart::ChartSource;
#[cfg(feature = "cluster")]
pub use cluster::ClusterSource;
pub use manifest::{ManifestSource, decode_documents};

/// Source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    CommandFailed {
        binary: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to configure cluster access: {0}")]
    ClusterConfig(String),

    #[cfg(feature = "cluster")]
    #[error("Cluster API error: {0}")]
    Kube(#[from] kube::Error),
}

/// Something that can produce a snapshot of resources
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Load every resource this source provides
    async fn load(&self) -> Result<Vec<Resource>, SourceError>;

    /// Short human readable description for logs
    fn describe(&self) -> String;
}
