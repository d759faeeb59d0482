//! In-memory view of a single configuration resource

use std::collections::BTreeMap;

use serde_json::Value;

use super::fields::{FieldAccess, FieldError};
use super::resource_kind::ResourceKind;

/// Errors raised when a decoded document cannot be viewed as a resource
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("document is not an object (found {0})")]
    NotAnObject(&'static str),

    #[error("document is missing `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Owner reference as found under `metadata.ownerReferences`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
}

impl OwnerReference {
    /// Identity of the owning resource
    pub fn id(&self) -> String {
        node_id(&self.kind, &self.name)
    }
}

/// Build the graph identity of a resource: `Kind/Name`.
///
/// Namespace is deliberately not part of the identity, so same-named
/// resources of one kind in different namespaces collapse into one node.
pub fn node_id(kind: &str, name: &str) -> String {
    format!("{}/{}", kind, name)
}

/// Read-only view over a decoded resource document
#[derive(Debug, Clone)]
pub struct Resource {
    kind: String,
    name: String,
    namespace: Option<String>,
    labels: BTreeMap<String, String>,
    owner_references: Vec<OwnerReference>,
    raw: Value,
}

impl Resource {
    /// Wrap a decoded document.
    ///
    /// `kind` and `metadata.name` are required. Malformed labels or owner
    /// references are dropped (with a debug log) rather than rejecting the
    /// whole resource.
    pub fn from_value(raw: Value) -> Result<Self, ResourceError> {
        if !raw.is_object() {
            return Err(ResourceError::NotAnObject(super::fields::value_type_name(
                &raw,
            )));
        }

        let kind = raw
            .non_empty_str_field(&["kind"])?
            .ok_or(ResourceError::MissingField("kind"))?
            .to_string();
        let name = raw
            .non_empty_str_field(&["metadata", "name"])?
            .ok_or(ResourceError::MissingField("metadata.name"))?
            .to_string();
        let namespace = raw
            .non_empty_str_field(&["metadata", "namespace"])
            .unwrap_or_else(|e| {
                tracing::debug!("{}/{}: ignoring namespace: {}", kind, name, e);
                None
            })
            .map(str::to_string);

        let labels = raw
            .string_map_field(&["metadata", "labels"])
            .unwrap_or_else(|e| {
                tracing::debug!("{}/{}: ignoring labels: {}", kind, name, e);
                None
            })
            .unwrap_or_default();

        let owner_references = parse_owner_references(&raw, &kind, &name);

        Ok(Self {
            kind,
            name,
            namespace,
            labels,
            owner_references,
            raw,
        })
    }

    /// Graph identity (`Kind/Name`)
    pub fn id(&self) -> String {
        node_id(&self.kind, &self.name)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The kind as a known standard kind, if it is one
    pub fn known_kind(&self) -> Option<ResourceKind> {
        ResourceKind::parse_optional(&self.kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn owner_references(&self) -> &[OwnerReference] {
        &self.owner_references
    }

    /// The underlying document
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl FieldAccess for Resource {
    fn field(&self, path: &[&str]) -> Result<Option<&Value>, FieldError> {
        self.raw.field(path)
    }
}

fn parse_owner_references(raw: &Value, kind: &str, name: &str) -> Vec<OwnerReference> {
    let entries = match raw.array_field(&["metadata", "ownerReferences"]) {
        Ok(Some(entries)) => entries,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::debug!("{}/{}: ignoring ownerReferences: {}", kind, name, e);
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| {
            let owner_kind = entry.non_empty_str_field(&["kind"]).ok().flatten()?;
            let owner_name = entry.non_empty_str_field(&["name"]).ok().flatten()?;
            Some(OwnerReference {
                kind: owner_kind.to_string(),
                name: owner_name.to_string(),
            })
        })
        .collect()
}
