//! Label selector grammar and evaluation
//!
//! Supports the full Kubernetes selector shape: `matchLabels` plus a list of
//! `matchExpressions`, all ANDed together.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::models::{FieldAccess, FieldError};

/// Set-based requirement operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::In => "In",
            Operator::NotIn => "NotIn",
            Operator::Exists => "Exists",
            Operator::DoesNotExist => "DoesNotExist",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In" => Ok(Operator::In),
            "NotIn" => Ok(Operator::NotIn),
            "Exists" => Ok(Operator::Exists),
            "DoesNotExist" => Ok(Operator::DoesNotExist),
            _ => Err(format!("Unknown selector operator: {}", s)),
        }
    }
}

/// One `matchExpressions` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub key: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Requirement {
    pub fn new(key: impl Into<String>, operator: Operator, values: &[&str]) -> Self {
        Self {
            key: key.into(),
            operator,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Evaluate against a label map
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let value = labels.get(&self.key);
        match self.operator {
            Operator::In => value.is_some_and(|v| self.values.contains(v)),
            Operator::NotIn => value.is_none_or(|v| !self.values.contains(v)),
            Operator::Exists => value.is_some(),
            Operator::DoesNotExist => value.is_none(),
        }
    }

    /// Parse the expression at `matchExpressions[position]`.
    ///
    /// `Ok(None)` for an entry missing `key` or `operator`. An operator
    /// outside the grammar or a non-string value is an error, since the
    /// requirement cannot be evaluated and dropping it would widen the
    /// selection.
    fn from_value(entry: &Value, position: usize) -> Result<Option<Self>, FieldError> {
        let position = position.to_string();
        let path = |leaf| ["matchExpressions", position.as_str(), leaf];

        let (Ok(Some(key)), Ok(Some(operator))) =
            (entry.non_empty_str_field(&["key"]), entry.str_field(&["operator"]))
        else {
            return Ok(None);
        };
        let operator = operator
            .parse::<Operator>()
            .map_err(|_| FieldError::new(&path("operator"), "selector operator", &entry["operator"]))?;
        let values = match entry.array_field(&["values"]) {
            Ok(None) => Vec::new(),
            Ok(Some(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| FieldError::new(&path("values"), "string", item))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Err(_) => return Err(FieldError::new(&path("values"), "array", &entry["values"])),
        };
        Ok(Some(Self {
            key: key.to_string(),
            operator,
            values,
        }))
    }
}

/// True when every requirement holds; an empty list is vacuously satisfied
pub fn matches_expressions(labels: &BTreeMap<String, String>, expressions: &[Requirement]) -> bool {
    expressions.iter().all(|requirement| requirement.matches(labels))
}

/// A structured label selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    pub match_labels: BTreeMap<String, String>,
    pub match_expressions: Vec<Requirement>,
}

impl LabelSelector {
    /// Selector made of equality requirements only
    pub fn from_labels(match_labels: BTreeMap<String, String>) -> Self {
        Self {
            match_labels,
            match_expressions: Vec::new(),
        }
    }

    /// Parse a `{matchLabels, matchExpressions}` object.
    ///
    /// A non-object selector, a malformed `matchLabels` map, or an expression
    /// that cannot be evaluated is an error, since evaluating the rest would
    /// widen the selection. Expressions missing `key` or `operator` are
    /// dropped.
    pub fn from_value(value: &Value) -> Result<Self, FieldError> {
        value.object_field(&[])?;
        let match_labels = value.string_map_field(&["matchLabels"])?.unwrap_or_default();
        let mut match_expressions = Vec::new();
        for (position, entry) in value
            .array_field(&["matchExpressions"])?
            .into_iter()
            .flatten()
            .enumerate()
        {
            match Requirement::from_value(entry, position)? {
                Some(requirement) => match_expressions.push(requirement),
                None => tracing::debug!("Dropping malformed selector expression: {}", entry),
            }
        }

        Ok(Self {
            match_labels,
            match_expressions,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty() && self.match_expressions.is_empty()
    }

    /// Evaluate the whole selector against a label map
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.match_labels
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
            && matches_expressions(labels, &self.match_expressions)
    }
}
