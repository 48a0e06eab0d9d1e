//! Typed source, join and query definitions.
//!
//! Each definition is read out of one entry of the value tree and validated
//! against its required-field contract. Renderers only ever see these types.

use serde_json::{Map, Value};

use super::error::{MappingError, MappingResult, UNKNOWN_ENTITY};
use super::item::{items_field, Item};
use super::value::{describe, field_text};

/// A table-backed source with its dimensions, measures and joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDefinition {
    /// Logical name of the source
    pub name: String,

    /// Physical table reference (e.g., "warehouse.orders")
    pub table: String,

    pub primary_key: Option<String>,

    pub dimensions: Vec<Item>,

    pub measures: Vec<Item>,

    pub joins: Vec<JoinDefinition>,
}

/// A join from a source to another source or a raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinDefinition {
    /// Alias of the joined entity
    pub name: String,

    /// Join predicate, as DSL text
    pub on: String,

    pub target: JoinTarget,

    pub relationship: Relationship,
}

/// Right-hand side of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinTarget {
    /// Another source, by name. Not checked against declared sources.
    Source(String),
    /// A physical table reference.
    Table(String),
}

/// Join cardinality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relationship {
    #[default]
    One,
    Many,
}

impl Relationship {
    /// Only the literal `many` selects [`Relationship::Many`].
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("many") => Relationship::Many,
            _ => Relationship::One,
        }
    }
}

/// An analytical query over a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefinition {
    pub name: String,

    /// Source the query runs against
    pub from: String,

    pub group_by: Vec<Item>,

    pub aggregate: Vec<Item>,

    /// Raw filter expression
    pub filter: Option<String>,
}

fn as_definition<'a>(value: &'a Value, kind: &str) -> MappingResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| {
            MappingError::format(format!("{} must be object: {}", kind, describe(value)))
        })
}

impl SourceDefinition {
    pub fn from_value(value: &Value) -> MappingResult<Self> {
        let map = as_definition(value, "Source")?;

        let (name, table) = match (field_text(map, "name"), field_text(map, "table")) {
            (Some(name), Some(table)) => (name, table),
            (name, _) => {
                return Err(MappingError::validation(format!(
                    "Each source needs both `name` and `table` (source `{}`).",
                    name.as_deref().unwrap_or(UNKNOWN_ENTITY)
                )))
            }
        };

        let dimensions = items_field(map, "dimensions")?;
        let measures = items_field(map, "measures")?;

        let joins = match map.get("joins") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| JoinDefinition::from_value(entry, &name))
                .collect::<MappingResult<Vec<_>>>()?,
            Some(other) => {
                return Err(MappingError::format(format!(
                    "Source `{}` has `joins` that is not a list: {}",
                    name,
                    describe(other)
                )))
            }
        };

        Ok(Self {
            name,
            table,
            primary_key: field_text(map, "primary_key"),
            dimensions,
            measures,
            joins,
        })
    }
}

impl JoinDefinition {
    /// Read one join declared on the source named `source`.
    pub fn from_value(value: &Value, source: &str) -> MappingResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            MappingError::format(format!(
                "Join on source `{}` must be object: {}",
                source,
                describe(value)
            ))
        })?;

        let (name, on) = match (field_text(map, "name"), field_text(map, "on")) {
            (Some(name), Some(on)) => (name, on),
            _ => {
                return Err(MappingError::validation(format!(
                    "Join on source `{}` requires `name` and `on`: {}",
                    source,
                    describe(value)
                )))
            }
        };

        // target_source wins when both are present
        let target = if let Some(target) = field_text(map, "target_source") {
            JoinTarget::Source(target)
        } else if let Some(table) = field_text(map, "table") {
            JoinTarget::Table(table)
        } else {
            return Err(MappingError::validation(format!(
                "Join `{}` on source `{}` requires `target_source` or `table`.",
                name, source
            )));
        };

        Ok(Self {
            name,
            on,
            target,
            relationship: Relationship::from_value(map.get("relationship")),
        })
    }
}

impl QueryDefinition {
    pub fn from_value(value: &Value) -> MappingResult<Self> {
        let map = as_definition(value, "Query")?;

        let (name, from) = match (field_text(map, "name"), field_text(map, "from")) {
            (Some(name), Some(from)) => (name, from),
            (name, _) => {
                return Err(MappingError::validation(format!(
                    "Each query needs both `name` and `from` (query `{}`).",
                    name.as_deref().unwrap_or(UNKNOWN_ENTITY)
                )))
            }
        };

        Ok(Self {
            name,
            from,
            group_by: items_field(map, "group_by")?,
            aggregate: items_field(map, "aggregate")?,
            filter: field_text(map, "where"),
        })
    }
}
