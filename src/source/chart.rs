//! Helm chart rendering
//!
//! Runs `helm template` and decodes the rendered manifests.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::models::Resource;

use super::manifest::decode_documents;
use super::{ResourceSource, SourceError};

/// A chart reference rendered locally through the Helm binary
#[derive(Debug, Clone)]
pub struct ChartSource {
    helm_binary: String,
    release: String,
    chart: String,
    namespace: Option<String>,
    values_files: Vec<PathBuf>,
}

impl ChartSource {
    pub fn new(helm_binary: impl Into<String>, release: impl Into<String>, chart: impl Into<String>) -> Self {
        Self {
            helm_binary: helm_binary.into(),
            release: release.into(),
            chart: chart.into(),
            namespace: None,
            values_files: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_values_files(mut self, values_files: Vec<PathBuf>) -> Self {
        self.values_files = values_files;
        self
    }

    /// Arguments passed to the Helm binary
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "template".to_string(),
            self.release.clone(),
            self.chart.clone(),
        ];
        if let Some(namespace) = &self.namespace {
            args.push("--namespace".to_string());
            args.push(namespace.clone());
        }
        for values in &self.values_files {
            args.push("-f".to_string());
            args.push(values.display().to_string());
        }
        args
    }
}

#[async_trait]
impl ResourceSource for ChartSource {
    async fn load(&self) -> Result<Vec<Resource>, SourceError> {
        let args = self.args();
        tracing::debug!("Running {} {}", self.helm_binary, args.join(" "));

        let output = Command::new(&self.helm_binary)
            .args(&args)
            .output()
            .await
            .map_err(|source| SourceError::Spawn {
                binary: self.helm_binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                binary: self.helm_binary.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let rendered = String::from_utf8_lossy(&output.stdout);
        Ok(decode_documents(&rendered, &self.describe()))
    }

    fn describe(&self) -> String {
        format!("chart {} (release {})", self.chart, self.release)
    }
}
