//! Structural issues that block a migration.
//!
//! These mirror the conditions that make the renderers fail, but are
//! collected instead of raised so a report can always be produced.

use std::fmt;

use serde_json::{Map, Value};

use crate::mapping::error::UNKNOWN_ENTITY;
use crate::mapping::value::field_text;

/// One blocking issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocker {
    SourceMissingName,
    SourceMissingTable { source: String },
    SourceWithoutMeasures { source: String },
    QueryMissingName,
    QueryMissingFrom { query: String },
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::SourceMissingName => write!(f, "Source missing `name`."),
            Blocker::SourceMissingTable { source } => {
                write!(f, "Source `{}` missing `table`.", source)
            }
            Blocker::SourceWithoutMeasures { source } => {
                write!(f, "Source `{}` has no measures.", source)
            }
            Blocker::QueryMissingName => write!(f, "Query missing `name`."),
            Blocker::QueryMissingFrom { query } => {
                write!(f, "Query `{}` missing `from`.", query)
            }
        }
    }
}

fn display_name(definition: &Map<String, Value>) -> String {
    field_text(definition, "name").unwrap_or_else(|| UNKNOWN_ENTITY.to_string())
}

fn has_measures(definition: &Map<String, Value>) -> bool {
    matches!(definition.get("measures"), Some(Value::Array(measures)) if !measures.is_empty())
}

/// Check one source definition, appending every issue found.
pub fn check_source(definition: &Map<String, Value>, blockers: &mut Vec<Blocker>) {
    if field_text(definition, "name").is_none() {
        blockers.push(Blocker::SourceMissingName);
    }
    if field_text(definition, "table").is_none() {
        blockers.push(Blocker::SourceMissingTable {
            source: display_name(definition),
        });
    }
    if !has_measures(definition) {
        blockers.push(Blocker::SourceWithoutMeasures {
            source: display_name(definition),
        });
    }
}

/// Check one query definition, appending every issue found.
pub fn check_query(definition: &Map<String, Value>, blockers: &mut Vec<Blocker>) {
    if field_text(definition, "name").is_none() {
        blockers.push(Blocker::QueryMissingName);
    }
    if field_text(definition, "from").is_none() {
        blockers.push(Blocker::QueryMissingFrom {
            query: display_name(definition),
        });
    }
}

/// Collect blockers across all sources, then all queries.
pub fn collect_blockers<'a>(
    sources: impl IntoIterator<Item = &'a Map<String, Value>>,
    queries: impl IntoIterator<Item = &'a Map<String, Value>>,
) -> Vec<Blocker> {
    let mut blockers = Vec::new();
    for source in sources {
        check_source(source, &mut blockers);
    }
    for query in queries {
        check_query(query, &mut blockers);
    }
    blockers
}
