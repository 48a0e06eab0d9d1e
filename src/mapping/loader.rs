//! Reading mapping files into the generic value tree.
//!
//! Parsing sits behind [`MappingParser`] so the rest of the crate never
//! cares whether a document started life as YAML or JSON.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::error::LoadError;

/// Parses mapping text into a value tree.
pub trait MappingParser {
    fn parse(&self, text: &str) -> Result<Value, LoadError>;
}

/// JSON mapping files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl MappingParser for JsonParser {
    fn parse(&self, text: &str) -> Result<Value, LoadError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// YAML mapping files. Produces the same tree shape as [`JsonParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl MappingParser for YamlParser {
    fn parse(&self, text: &str) -> Result<Value, LoadError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Pick a parser from the file extension: `.json` is JSON, anything else YAML.
pub fn parser_for_path(path: &Path) -> Box<dyn MappingParser> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Box::new(JsonParser)
    } else {
        Box::new(YamlParser)
    }
}

/// Read and parse a mapping file.
pub fn load_mapping(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read mapping file");
    parser_for_path(path).parse(&text)
}
