//! Error types for mapping compilation and loading.

use std::path::PathBuf;

/// Placeholder used in messages when a definition has no usable name.
pub const UNKNOWN_ENTITY: &str = "unknown";

/// Errors raised while compiling a mapping document.
///
/// Both variants are caller-input defects; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// A definition is missing one of its required fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An entry does not have any recognized shape.
    #[error("Format error: {0}")]
    Format(String),
}

impl MappingError {
    pub fn validation(message: impl Into<String>) -> Self {
        MappingError::Validation(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        MappingError::Format(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MappingError::Validation(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, MappingError::Format(_))
    }
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Errors raised while reading mapping or inventory files from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON mapping: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML mapping: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read inventory {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
