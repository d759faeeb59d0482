//! Manifest decoding
//!
//! Reads YAML or JSON manifests from files, directories or stdin and turns
//! every document into a [`Resource`]. Multi-document streams are split on
//! `---`, `List` documents are flattened into their items, and anything that
//! is not a resource is skipped with a warning.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::models::{FieldAccess, Resource};

use super::{ResourceSource, SourceError};

/// Path that stands for standard input
pub const STDIN_PATH: &str = "-";

const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Decode a (possibly multi-document) YAML or JSON stream.
///
/// `origin` names the stream in log messages. A YAML syntax error stops
/// decoding of the remainder of that stream; resources decoded before it
/// are kept.
pub fn decode_documents(text: &str, origin: &str) -> Vec<Resource> {
    let mut resources = Vec::new();

    for (position, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = match Value::deserialize(document) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}: document {}: invalid YAML: {}", origin, position + 1, e);
                break;
            }
        };
        if value.is_null() {
            continue;
        }
        collect_resources(value, origin, position + 1, &mut resources);
    }

    tracing::debug!("{}: decoded {} resources", origin, resources.len());
    resources
}

fn collect_resources(value: Value, origin: &str, position: usize, out: &mut Vec<Resource>) {
    if is_list(&value) {
        let Value::Object(mut map) = value else {
            return;
        };
        let Some(Value::Array(items)) = map.remove("items") else {
            return;
        };
        for item in items {
            collect_resources(item, origin, position, out);
        }
        return;
    }

    match Resource::from_value(value) {
        Ok(resource) => out.push(resource),
        Err(e) => tracing::warn!("{}: document {}: skipped: {}", origin, position, e),
    }
}

/// `kind: List` or any `*List` kind carrying an `items` array
fn is_list(value: &Value) -> bool {
    let kind = value.str_field(&["kind"]).ok().flatten();
    kind.is_some_and(|kind| kind.ends_with("List"))
        && matches!(value.array_field(&["items"]), Ok(Some(_)))
}

/// Manifests read from local paths (files, directories or `-` for stdin)
#[derive(Debug, Clone)]
pub struct ManifestSource {
    paths: Vec<PathBuf>,
}

impl ManifestSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[async_trait]
impl ResourceSource for ManifestSource {
    async fn load(&self) -> Result<Vec<Resource>, SourceError> {
        let mut resources = Vec::new();
        for path in &self.paths {
            if path.as_os_str() == STDIN_PATH {
                let text = read_stdin().await?;
                resources.extend(decode_documents(&text, "<stdin>"));
                continue;
            }
            for file in manifest_files(path).await? {
                tracing::debug!("Reading manifest: {:?}", file);
                let text = tokio::fs::read_to_string(&file)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: file.clone(),
                        source,
                    })?;
                resources.extend(decode_documents(&text, &file.display().to_string()));
            }
        }
        Ok(resources)
    }

    fn describe(&self) -> String {
        let paths: Vec<String> = self
            .paths
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        format!("manifests {}", paths.join(", "))
    }
}

async fn read_stdin() -> Result<String, SourceError> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .map_err(|source| SourceError::Io {
            path: PathBuf::from(STDIN_PATH),
            source,
        })?;
    Ok(text)
}

/// Expand `root` into manifest files.
///
/// A file is returned as is, whatever its extension. Directories are walked
/// recursively and only YAML/JSON files are kept, sorted by path.
pub async fn manifest_files(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| SourceError::Io { path, source }
    };

    let metadata = tokio::fs::metadata(root).await.map_err(io_error(root))?;
    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_error(&dir))?;
        while let Some(entry) = entries.next_entry().await.map_err(io_error(&dir))? {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(io_error(&path))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if has_manifest_extension(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
