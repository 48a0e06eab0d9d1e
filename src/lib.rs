//! # malloy-bridge
//!
//! Compiles warehouse mapping documents into Malloy scaffolds and migration
//! readiness reports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Mapping file (YAML / JSON) + inventory CSV      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [mapping::loader]
//! ┌─────────────────────────────────────────────────────────┐
//! │        MappingDocument (sources[], queries[])            │
//! └─────────────────────────────────────────────────────────┘
//!                │                            │
//!                ▼ [emitter]                  ▼ [readiness]
//! ┌──────────────────────────────┐ ┌────────────────────────┐
//! │ sources/*.malloy             │ │ score + blockers       │
//! │ queries/*.malloy             │ │ Markdown report        │
//! └──────────────────────────────┘ └────────────────────────┘
//! ```
//!
//! The renderers and the scorer are pure functions over the parsed tree;
//! file handling lives in the loaders and the CLI.

pub mod config;
pub mod emitter;
pub mod logging;
pub mod mapping;
pub mod naming;
pub mod readiness;

pub use emitter::{generate_artifacts, render_query, render_source, Artifact, ArtifactKind};
pub use mapping::{InventoryTables, MappingDocument, MappingError, MappingResult};
pub use naming::normalize_name;
pub use readiness::{build_readiness_report, ReadinessReport};
