//! Mapping definitions → Malloy source text.
//!
//! Sources become `source:` blocks and queries become `query:` blocks. Each
//! rendered definition is paired with its relative output path by
//! [`generate_artifacts`]; writing to disk is left to the caller.

pub mod artifact;
pub mod format;
pub mod query;
pub mod source;

pub use artifact::{
    artifact_path, colliding_paths, generate_artifacts, Artifact, ArtifactKind, MALLOY_EXTENSION,
};
pub use format::{Indent, IndentWriter};
pub use query::{emit_query, render_query};
pub use source::{emit_source, render_source};
