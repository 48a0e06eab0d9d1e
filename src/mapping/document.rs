//! Root view over a parsed mapping document.

use serde_json::Value;

use super::error::{MappingError, MappingResult};
use super::value::describe;

/// Borrowed view of a mapping document's `sources` and `queries`.
///
/// Construction checks only the top-level shape. Individual entries are left
/// untouched so the renderers can reject them and the readiness scorer can
/// report them as blockers.
#[derive(Debug, Clone, Copy)]
pub struct MappingDocument<'a> {
    sources: &'a [Value],
    queries: &'a [Value],
}

impl<'a> MappingDocument<'a> {
    /// View a parsed value tree as a mapping document.
    ///
    /// The root must be a mapping. `sources` and `queries` may be absent or
    /// null (treated as empty) but otherwise must be sequences.
    pub fn new(root: &'a Value) -> MappingResult<Self> {
        let map = root
            .as_object()
            .ok_or_else(|| MappingError::format("Mapping root must be an object."))?;

        Ok(Self {
            sources: sequence(map.get("sources"), "sources")?,
            queries: sequence(map.get("queries"), "queries")?,
        })
    }

    pub fn sources(&self) -> &'a [Value] {
        self.sources
    }

    pub fn queries(&self) -> &'a [Value] {
        self.queries
    }
}

fn sequence<'a>(value: Option<&'a Value>, key: &str) -> MappingResult<&'a [Value]> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(entries)) => Ok(entries.as_slice()),
        Some(other) => Err(MappingError::format(format!(
            "`sources` and `queries` must be arrays; `{}` is {}",
            key,
            describe(other)
        ))),
    }
}
