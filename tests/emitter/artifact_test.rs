//! Tests for artifact planning and writing.

use std::fs;
use std::path::PathBuf;

use malloy_bridge::emitter::{generate_artifacts, ArtifactKind};
use malloy_bridge::mapping::MappingDocument;
use serde_json::json;

#[test]
fn test_sources_then_queries_in_order() {
    let root = json!({
        "queries": [{"name": "Daily Revenue", "from": "orders"}],
        "sources": [
            {"name": "Orders", "table": "raw.orders"},
            {"name": "customers", "table": "raw.customers"}
        ]
    });
    let document = MappingDocument::new(&root).unwrap();
    let artifacts = generate_artifacts(&document).unwrap();

    let paths: Vec<PathBuf> = artifacts.iter().map(|a| a.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("sources/orders.malloy"),
            PathBuf::from("sources/customers.malloy"),
            PathBuf::from("queries/daily_revenue.malloy"),
        ]
    );
    assert_eq!(artifacts[2].kind, ArtifactKind::Query);
    assert!(artifacts[0].contents.starts_with("source: Orders is table('raw.orders')"));
}

#[test]
fn test_non_mapping_source_is_format_error() {
    let root = json!({"sources": ["orders"]});
    let document = MappingDocument::new(&root).unwrap();
    let err = generate_artifacts(&document).unwrap_err();
    assert_eq!(err.to_string(), r#"Format error: Source must be object: "orders""#);
}

#[test]
fn test_first_bad_definition_aborts_run() {
    let root = json!({
        "sources": [{"name": "ok", "table": "t"}, {"name": "broken"}],
        "queries": [{"name": "q", "from": "ok"}]
    });
    let document = MappingDocument::new(&root).unwrap();
    assert!(generate_artifacts(&document).unwrap_err().is_validation());
}

#[test]
fn test_write_to_creates_directories() {
    let root = json!({
        "sources": [{"name": "orders", "table": "raw.orders", "measures": ["c"]}],
        "queries": [{"name": "q", "from": "orders"}]
    });
    let document = MappingDocument::new(&root).unwrap();
    let artifacts = generate_artifacts(&document).unwrap();

    let out = tempfile::tempdir().unwrap();
    for artifact in &artifacts {
        artifact.write_to(out.path()).unwrap();
    }

    let written = fs::read_to_string(out.path().join("sources/orders.malloy")).unwrap();
    assert_eq!(written, artifacts[0].contents);
    assert!(out.path().join("queries/q.malloy").is_file());
}
