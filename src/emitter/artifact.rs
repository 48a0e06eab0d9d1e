//! Generated files and where they go.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::query::render_query;
use super::source::render_source;
use crate::mapping::value::{describe, scalar_text};
use crate::mapping::{MappingDocument, MappingError, MappingResult};
use crate::naming::normalize_name;

/// Extension of every generated file.
pub const MALLOY_EXTENSION: &str = "malloy";

/// What a generated file defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Source,
    Query,
}

impl ArtifactKind {
    /// Directory the artifact lives in, relative to the output root.
    pub fn directory(self) -> &'static str {
        match self {
            ArtifactKind::Source => "sources",
            ArtifactKind::Query => "queries",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ArtifactKind::Source => "Source",
            ArtifactKind::Query => "Query",
        }
    }
}

/// One rendered file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,

    /// Path relative to the output root, e.g. `sources/orders.malloy`
    pub path: PathBuf,

    pub contents: String,
}

impl Artifact {
    /// Write under `out_dir`, creating directories as needed.
    pub fn write_to(&self, out_dir: &Path) -> io::Result<PathBuf> {
        let target = out_dir.join(&self.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &self.contents)?;
        debug!(path = %target.display(), "wrote artifact");
        Ok(target)
    }
}

/// Relative output path for a definition name.
pub fn artifact_path(kind: ArtifactKind, name: &str) -> PathBuf {
    Path::new(kind.directory()).join(format!("{}.{}", normalize_name(name), MALLOY_EXTENSION))
}

fn build_artifact(
    kind: ArtifactKind,
    entry: &serde_json::Value,
    render: fn(&serde_json::Value) -> MappingResult<String>,
) -> MappingResult<Artifact> {
    let map = entry.as_object().ok_or_else(|| {
        MappingError::format(format!("{} must be object: {}", kind.label(), describe(entry)))
    })?;
    let name = scalar_text(map.get("name")).unwrap_or_default();
    Ok(Artifact {
        kind,
        path: artifact_path(kind, &name),
        contents: render(entry)?,
    })
}

/// Render every source, then every query, in document order.
///
/// The first failing definition aborts the whole run.
pub fn generate_artifacts(document: &MappingDocument<'_>) -> MappingResult<Vec<Artifact>> {
    let sources = document
        .sources()
        .iter()
        .map(|entry| build_artifact(ArtifactKind::Source, entry, render_source));
    let queries = document
        .queries()
        .iter()
        .map(|entry| build_artifact(ArtifactKind::Query, entry, render_query));

    let artifacts = sources.chain(queries).collect::<MappingResult<Vec<_>>>()?;
    info!(
        sources = document.sources().len(),
        queries = document.queries().len(),
        "generated artifacts"
    );
    Ok(artifacts)
}

/// Artifact paths produced more than once, in first-seen order.
///
/// Distinct definition names can normalize to the same file name; later
/// artifacts overwrite earlier ones when written.
pub fn colliding_paths(artifacts: &[Artifact]) -> Vec<&Path> {
    let mut seen = std::collections::HashSet::new();
    let mut collisions: Vec<&Path> = Vec::new();
    for artifact in artifacts {
        let path = artifact.path.as_path();
        if !seen.insert(path) && !collisions.contains(&path) {
            collisions.push(path);
        }
    }
    collisions
}
