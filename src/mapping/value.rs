//! Helpers for reading fields out of the generic value tree.

use serde_json::{Map, Value};

/// Read a scalar field as text.
///
/// Non-empty strings and numbers count as present. Everything else (null,
/// empty strings, booleans, sequences, mappings) counts as absent.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a named scalar field from a mapping.
pub fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    scalar_text(map.get(key))
}

/// Render an entry for use in an error message.
pub fn describe(value: &Value) -> String {
    value.to_string()
}
