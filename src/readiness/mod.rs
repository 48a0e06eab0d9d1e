//! Migration readiness scoring.
//!
//! Scores how complete a mapping document is, both on its own and against an
//! inventory of known legacy tables, and renders the result as Markdown.
//!
//! # Example
//!
//! ```
//! use malloy_bridge::mapping::InventoryTables;
//! use malloy_bridge::readiness::build_readiness_report;
//! use serde_json::json;
//!
//! let mapping = json!({"sources": [], "queries": []});
//! let (report, score) = build_readiness_report(&mapping, &InventoryTables::new()).unwrap();
//! assert_eq!(score, 45);
//! assert!(report.starts_with("# Malloy Migration Readiness Report"));
//! ```

pub mod blockers;
pub mod weights;

pub use blockers::{collect_blockers, Blocker};
pub use weights::{score, ScoreInputs};

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::info;

use crate::mapping::value::field_text;
use crate::mapping::{InventoryTables, MappingDocument, MappingResult};

/// Markers that flag unfinished mapping content.
const TODO_MARKERS: &[&str] = &["todo", "tbd"];

/// Fixed follow-ups printed at the end of every report.
pub const NEXT_ACTIONS: &[&str] = &[
    "Resolve all blockers before dual-run.",
    "Remove TODO/TBD markers and assign owners.",
    "Re-run scaffold generation and parity checks after updates.",
];

/// Whether any string nested anywhere in `value` carries a TODO marker.
pub fn contains_todo(value: &Value) -> bool {
    match value {
        Value::String(s) => {
            let lowered = s.to_lowercase();
            TODO_MARKERS.iter().any(|marker| lowered.contains(marker))
        }
        Value::Array(items) => items.iter().any(contains_todo),
        Value::Object(map) => map.values().any(contains_todo),
        _ => false,
    }
}

/// Everything the report says about a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessReport {
    pub score: u32,
    pub source_count: usize,
    pub query_count: usize,
    pub mapped_tables: BTreeSet<String>,
    /// Size of the inventory; zero when none was supplied
    pub inventory_tables: usize,
    /// Mapped tables present in the inventory
    pub covered_tables: usize,
    /// Definitions carrying at least one TODO/TBD marker
    pub todo_count: usize,
    pub blockers: Vec<Blocker>,
}

impl ReadinessReport {
    /// Score a mapping document against an inventory.
    ///
    /// Entries of `sources`/`queries` that are not mappings are skipped.
    pub fn assess(document: &MappingDocument<'_>, inventory: &InventoryTables) -> Self {
        let sources: Vec<&Map<String, Value>> =
            document.sources().iter().filter_map(Value::as_object).collect();
        let queries: Vec<&Map<String, Value>> =
            document.queries().iter().filter_map(Value::as_object).collect();

        let mapped_tables: BTreeSet<String> = sources
            .iter()
            .filter_map(|source| field_text(source, "table"))
            .collect();
        let covered_tables = mapped_tables.intersection(inventory).count();

        let todo_count = sources
            .iter()
            .chain(queries.iter())
            .filter(|definition| definition.values().any(contains_todo))
            .count();

        let blockers = collect_blockers(sources.iter().copied(), queries.iter().copied());

        let score = score(&ScoreInputs {
            source_count: sources.len(),
            query_count: queries.len(),
            covered_tables,
            inventory_tables: inventory.len(),
            todo_count,
            missing_required: blockers.len(),
        });

        info!(
            score,
            sources = sources.len(),
            queries = queries.len(),
            blockers = blockers.len(),
            "assessed migration readiness"
        );

        Self {
            score,
            source_count: sources.len(),
            query_count: queries.len(),
            mapped_tables,
            inventory_tables: inventory.len(),
            covered_tables,
            todo_count,
            blockers,
        }
    }

    /// Number of blocking issues found.
    pub fn missing_required(&self) -> usize {
        self.blockers.len()
    }

    /// Render the report as Markdown.
    pub fn render_markdown(&self) -> String {
        let coverage = if self.inventory_tables > 0 {
            format!("**{}/{}**", self.covered_tables, self.inventory_tables)
        } else {
            "**N/A** (inventory not provided)".to_string()
        };

        let mut lines = vec![
            "# Malloy Migration Readiness Report".to_string(),
            String::new(),
            format!("- Readiness score: **{}/100**", self.score),
            format!("- Source definitions: **{}**", self.source_count),
            format!("- Query definitions: **{}**", self.query_count),
            format!("- Mapped legacy tables: **{}**", self.mapped_tables.len()),
            format!("- Inventory table coverage: {}", coverage),
            format!("- TODO/TBD markers: **{}**", self.todo_count),
            String::new(),
            "## Blocking Issues".to_string(),
        ];
        if self.blockers.is_empty() {
            lines.push("- No blocking structural issues detected.".to_string());
        } else {
            lines.extend(self.blockers.iter().map(|blocker| format!("- {}", blocker)));
        }
        lines.push(String::new());
        lines.push("## Next Actions".to_string());
        lines.extend(NEXT_ACTIONS.iter().map(|action| format!("- {}", action)));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Score a raw mapping tree and render the Markdown report.
///
/// Fails only when the root is not a mapping or `sources`/`queries` are
/// present but not sequences.
pub fn build_readiness_report(
    mapping: &Value,
    inventory: &InventoryTables,
) -> MappingResult<(String, u32)> {
    let document = MappingDocument::new(mapping)?;
    let report = ReadinessReport::assess(&document, inventory);
    Ok((report.render_markdown(), report.score))
}
