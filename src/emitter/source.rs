//! SourceDefinition → Malloy `source:` emission.

use serde_json::Value;
use tracing::debug;

use super::format::IndentWriter;
use crate::mapping::{JoinDefinition, JoinTarget, MappingResult, Relationship, SourceDefinition};

/// Malloy keyword for a join of the given cardinality.
fn join_keyword(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::One => "join_one",
        Relationship::Many => "join_many",
    }
}

/// Emit one join line.
fn emit_join(join: &JoinDefinition) -> String {
    let target = match &join.target {
        JoinTarget::Source(source) => source.clone(),
        JoinTarget::Table(table) => format!("table('{}')", table),
    };
    format!(
        "{}: {} is {} with {}",
        join_keyword(join.relationship),
        join.name,
        target,
        join.on
    )
}

/// Emit a validated source definition.
/// Example output:
/// ```text
/// source: orders is table('raw.orders') extend {
///   primary_key: order_id
///   dimension: status is status
///   measure: order_count is count()
///   join_one: customers is customers with customer_id
/// }
/// ```
pub fn emit_source(w: &mut IndentWriter, source: &SourceDefinition) {
    w.open_block(&format!(
        "source: {} is table('{}') extend",
        source.name, source.table
    ));

    if let Some(primary_key) = &source.primary_key {
        w.write_line(&format!("primary_key: {}", primary_key));
    }

    for dimension in &source.dimensions {
        w.write_line(&format!("dimension: {} is {}", dimension.name(), dimension.expr()));
    }

    for measure in &source.measures {
        w.write_line(&format!("measure: {} is {}", measure.name(), measure.expr()));
    }

    for join in &source.joins {
        w.write_line(&emit_join(join));
    }

    w.close_block();
}

/// Render one raw source entry to Malloy text.
///
/// Fails with a validation error when `name`, `table`, or a join's required
/// fields are missing, and with a format error for unrecognized entries.
pub fn render_source(source: &Value) -> MappingResult<String> {
    let source = SourceDefinition::from_value(source)?;
    let mut w = IndentWriter::default();
    emit_source(&mut w, &source);
    debug!(
        source = %source.name,
        dimensions = source.dimensions.len(),
        measures = source.measures.len(),
        joins = source.joins.len(),
        "rendered source"
    );
    Ok(w.into_string())
}
