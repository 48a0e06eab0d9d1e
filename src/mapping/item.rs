//! Dimension, measure, group and aggregate entries.
//!
//! Mapping files accept either a bare name or a `{name, expr}` record for
//! each entry. Entries are normalized eagerly into [`Item`] so the renderers
//! never inspect raw values.

use serde_json::{Map, Value};

use super::error::{MappingError, MappingResult};
use super::value::{describe, field_text};

/// A normalized entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Bare name; the expression is the name itself.
    Named(String),
    /// Name bound to an explicit expression.
    NamedWithExpr { name: String, expr: String },
}

impl Item {
    /// Normalize one raw entry.
    pub fn from_value(entry: &Value) -> MappingResult<Self> {
        match entry {
            Value::String(name) if !name.is_empty() => Ok(Item::Named(name.clone())),
            Value::Object(map) => {
                let name = field_text(map, "name").ok_or_else(|| {
                    MappingError::format(format!("Item requires `name`: {}", describe(entry)))
                })?;
                Ok(match field_text(map, "expr") {
                    Some(expr) => Item::NamedWithExpr { name, expr },
                    None => Item::Named(name),
                })
            }
            other => Err(MappingError::format(format!(
                "Unsupported item format: {}",
                describe(other)
            ))),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Named(name) | Item::NamedWithExpr { name, .. } => name,
        }
    }

    /// The expression, falling back to the name for bare entries.
    pub fn expr(&self) -> &str {
        match self {
            Item::Named(name) => name,
            Item::NamedWithExpr { expr, .. } => expr,
        }
    }
}

/// Lazily normalize a sequence of raw entries, preserving order.
pub fn iter_items(entries: &[Value]) -> impl Iterator<Item = MappingResult<Item>> + '_ {
    entries.iter().map(Item::from_value)
}

/// Read and normalize an optional sequence field of a definition.
///
/// An absent or null field is an empty sequence.
pub fn items_field(definition: &Map<String, Value>, key: &str) -> MappingResult<Vec<Item>> {
    match definition.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => iter_items(entries).collect(),
        Some(other) => Err(MappingError::format(format!(
            "`{}` must be a list, got: {}",
            key,
            describe(other)
        ))),
    }
}
