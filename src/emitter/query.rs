//! QueryDefinition → Malloy `query:` emission.

use serde_json::Value;
use tracing::debug;

use super::format::IndentWriter;
use crate::mapping::{Item, MappingResult, QueryDefinition};

/// Emit a `<label>:` block listing item names. Nothing for an empty list.
fn emit_name_block(w: &mut IndentWriter, label: &str, items: &[Item]) {
    if items.is_empty() {
        return;
    }
    w.write_line(&format!("{}:", label));
    w.indent();
    for item in items {
        w.write_line(item.name());
    }
    w.dedent();
}

/// Emit a validated query definition.
pub fn emit_query(w: &mut IndentWriter, query: &QueryDefinition) {
    w.open_block(&format!("query: {} is {} ->", query.name, query.from));
    emit_name_block(w, "group_by", &query.group_by);
    emit_name_block(w, "aggregate", &query.aggregate);
    if let Some(filter) = &query.filter {
        w.write_line(&format!("where: {}", filter));
    }
    w.close_block();
}

/// Render one raw query entry to Malloy text.
pub fn render_query(query: &Value) -> MappingResult<String> {
    let query = QueryDefinition::from_value(query)?;
    let mut w = IndentWriter::default();
    emit_query(&mut w, &query);
    debug!(query = %query.name, from = %query.from, "rendered query");
    Ok(w.into_string())
}
