//! Typed access to nested fields of untyped documents
//!
//! Every analyzer reads kind-specific fields out of a `serde_json::Value`.
//! [`FieldAccess`] centralises the shape checks so callers only deal with
//! three outcomes:
//!
//! - `Ok(Some(v))` - the field exists with the requested shape
//! - `Ok(None)` - the field (or one of its parents) is absent or `null`
//! - `Err(FieldError)` - something along the path has the wrong shape

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A field exists but does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{path}`: expected {expected}, found {found}")]
pub struct FieldError {
    /// Dotted path up to and including the offending segment
    pub path: String,
    /// Shape that was required at this position
    pub expected: &'static str,
    /// Shape that was actually found
    pub found: &'static str,
}

impl FieldError {
    pub(crate) fn new(path: &[&str], expected: &'static str, found: &Value) -> Self {
        Self {
            path: path.join("."),
            expected,
            found: value_type_name(found),
        }
    }
}

/// Name of a JSON value's type for diagnostics
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Shape-checked lookups by path segments
pub trait FieldAccess {
    /// Look up the value at `path`; an empty path returns the value itself
    fn field(&self, path: &[&str]) -> Result<Option<&Value>, FieldError>;

    /// Look up a string field
    fn str_field(&self, path: &[&str]) -> Result<Option<&str>, FieldError> {
        match self.field(path)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::new(path, "string", other)),
        }
    }

    /// Look up a non-empty string field; an empty string counts as absent
    fn non_empty_str_field(&self, path: &[&str]) -> Result<Option<&str>, FieldError> {
        Ok(self.str_field(path)?.filter(|s| !s.is_empty()))
    }

    /// Look up an object field
    fn object_field(&self, path: &[&str]) -> Result<Option<&Map<String, Value>>, FieldError> {
        match self.field(path)? {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(FieldError::new(path, "object", other)),
        }
    }

    /// Look up an array field
    fn array_field(&self, path: &[&str]) -> Result<Option<&Vec<Value>>, FieldError> {
        match self.field(path)? {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(FieldError::new(path, "array", other)),
        }
    }

    /// Look up a string → string map such as labels or a flat selector.
    ///
    /// YAML happily decodes `version: 2` as a number, so scalar values are
    /// stringified. Nested objects or arrays are a shape error.
    fn string_map_field(&self, path: &[&str]) -> Result<Option<BTreeMap<String, String>>, FieldError> {
        let Some(map) = self.object_field(path)? else {
            return Ok(None);
        };
        let mut out = BTreeMap::new();
        for (key, value) in map {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                other => {
                    let mut full: Vec<&str> = path.to_vec();
                    full.push(key);
                    return Err(FieldError::new(&full, "scalar", other));
                }
            };
            out.insert(key.clone(), value);
        }
        Ok(Some(out))
    }
}

impl FieldAccess for Value {
    fn field(&self, path: &[&str]) -> Result<Option<&Value>, FieldError> {
        let mut current = self;
        for (depth, segment) in path.iter().enumerate() {
            match current {
                Value::Null => return Ok(None),
                Value::Object(map) => match map.get(*segment) {
                    Some(next) => current = next,
                    None => return Ok(None),
                },
                other => return Err(FieldError::new(&path[..depth], "object", other)),
            }
        }
        if current.is_null() {
            return Ok(None);
        }
        Ok(Some(current))
    }
}
