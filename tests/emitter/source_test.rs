//! Tests for rendering source definitions to Malloy.

use insta::assert_snapshot;
use malloy_bridge::emitter::render_source;
use malloy_bridge::mapping::MappingError;
use serde_json::{json, Value};

fn orders_source() -> Value {
    json!({
        "name": "orders",
        "table": "warehouse.fact_orders",
        "primary_key": "order_id",
        "dimensions": [
            "order_id",
            {"name": "order_status", "expr": "upper(status)"},
            {"name": "region"}
        ],
        "measures": [
            {"name": "order_count", "expr": "count()"},
            {"name": "revenue", "expr": "sum(amount)"}
        ],
        "joins": [
            {"name": "customers", "target_source": "customers", "on": "customer_id = customers.customer_id"},
            {"name": "items", "table": "warehouse.fact_items", "on": "order_id = items.order_id", "relationship": "many"}
        ]
    })
}

/// Pull `dimension:` / `measure:` names back out of rendered text.
fn declared_names(text: &str, keyword: &str) -> Vec<String> {
    let prefix = format!("{}: ", keyword);
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix(prefix.as_str()))
        .filter_map(|rest| rest.split(" is ").next())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_full_source() {
    let text = render_source(&orders_source()).unwrap();
    assert_snapshot!(text, @r"
    source: orders is table('warehouse.fact_orders') extend {
      primary_key: order_id
      dimension: order_id is order_id
      dimension: order_status is upper(status)
      dimension: region is region
      measure: order_count is count()
      measure: revenue is sum(amount)
      join_one: customers is customers with customer_id = customers.customer_id
      join_many: items is table('warehouse.fact_items') with order_id = items.order_id
    }
    ");
}

#[test]
fn test_render_ends_with_newline() {
    let text = render_source(&json!({"name": "a", "table": "t"})).unwrap();
    assert_eq!(text, "source: a is table('t') extend {\n}\n");
}

#[test]
fn test_primary_key_is_optional() {
    let text = render_source(&json!({"name": "a", "table": "t", "measures": ["c"]})).unwrap();
    assert!(!text.contains("primary_key"));
}

#[test]
fn test_one_dimension_line_per_entry_in_order() {
    let source = json!({
        "name": "events",
        "table": "raw.events",
        "dimensions": ["z_last", "a_first", {"name": "m_middle", "expr": "coalesce(m, 0)"}]
    });
    let text = render_source(&source).unwrap();
    assert_eq!(declared_names(&text, "dimension"), vec!["z_last", "a_first", "m_middle"]);
}

#[test]
fn test_names_round_trip_through_rendered_text() {
    let text = render_source(&orders_source()).unwrap();
    assert_eq!(
        declared_names(&text, "dimension"),
        vec!["order_id", "order_status", "region"]
    );
    assert_eq!(declared_names(&text, "measure"), vec!["order_count", "revenue"]);
}

#[test]
fn test_numeric_scalars_render_as_text() {
    let text = render_source(&json!({"name": "a", "table": "t", "primary_key": 1})).unwrap();
    assert!(text.contains("  primary_key: 1\n"));
}

// ============================================================================
// Joins
// ============================================================================

#[test]
fn test_target_source_takes_precedence_over_table() {
    let source = json!({
        "name": "orders",
        "table": "raw.orders",
        "joins": [{"name": "c", "on": "c.id = customer_id", "target_source": "customers", "table": "raw.customers"}]
    });
    let text = render_source(&source).unwrap();
    assert!(text.contains("join_one: c is customers with c.id = customer_id"));
    assert!(!text.contains("raw.customers"));
}

#[test]
fn test_unknown_relationship_is_join_one() {
    let source = json!({
        "name": "orders",
        "table": "raw.orders",
        "joins": [{"name": "c", "on": "x", "table": "raw.c", "relationship": "several"}]
    });
    let text = render_source(&source).unwrap();
    assert!(text.contains("join_one: c is table('raw.c') with x"));
}

#[test]
fn test_join_missing_on_fails() {
    let source = json!({
        "name": "orders",
        "table": "raw.orders",
        "joins": [{"name": "c", "target_source": "customers"}]
    });
    let err = render_source(&source).unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {:?}", err);
    assert!(err.to_string().contains("requires `name` and `on`"));
}

#[test]
fn test_join_without_target_fails() {
    let source = json!({
        "name": "orders",
        "table": "raw.orders",
        "joins": [{"name": "c", "on": "x"}]
    });
    let err = render_source(&source).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("`target_source` or `table`"));
}

#[test]
fn test_join_must_be_mapping() {
    let source = json!({"name": "orders", "table": "raw.orders", "joins": ["customers"]});
    assert!(render_source(&source).unwrap_err().is_format());
}

// ============================================================================
// Required fields and entry shapes
// ============================================================================

#[test]
fn test_missing_table_always_fails_validation() {
    let cases = [
        json!({"name": "orders"}),
        json!({"name": "orders", "table": ""}),
        json!({"name": "orders", "table": null, "measures": ["c"]}),
        json!({"name": "orders", "dimensions": [42]}),
    ];
    for source in cases {
        let err = render_source(&source).unwrap_err();
        assert!(err.is_validation(), "{} gave {:?}", source, err);
        assert!(err
            .to_string()
            .contains("Each source needs both `name` and `table`"));
    }
}

#[test]
fn test_missing_name_reports_unknown() {
    let err = render_source(&json!({"table": "raw.orders"})).unwrap_err();
    assert_eq!(
        err,
        MappingError::Validation(
            "Each source needs both `name` and `table` (source `unknown`).".into()
        )
    );
}

#[test]
fn test_unsupported_dimension_entry_is_format_error() {
    let source = json!({"name": "a", "table": "t", "dimensions": ["ok", ["nested"]]});
    let err = render_source(&source).unwrap_err();
    assert_eq!(
        err,
        MappingError::Format(r#"Unsupported item format: ["nested"]"#.into())
    );
}

#[test]
fn test_empty_entry_name_is_format_error() {
    let source = json!({"name": "a", "table": "t", "dimensions": [""], "measures": [""]});
    let err = render_source(&source).unwrap_err();
    assert_eq!(
        err,
        MappingError::Format(r#"Unsupported item format: """#.into())
    );
}
