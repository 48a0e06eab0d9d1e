//! Tests for loading mapping files and inventory CSVs from disk.

use std::fs;
use std::path::Path;

use malloy_bridge::emitter::generate_artifacts;
use malloy_bridge::mapping::{
    load_inventory_tables, load_mapping, LoadError, MappingDocument, DEFAULT_INVENTORY_COLUMN,
};
use malloy_bridge::readiness::build_readiness_report;
use tempfile::TempDir;

const YAML_MAPPING: &str = r#"
sources:
  - name: orders
    table: warehouse.orders
    primary_key: order_id
    dimensions:
      - order_id
      - name: order_status
        expr: upper(status)
    measures:
      - name: order_count
        expr: count()
    joins:
      - name: customers
        target_source: customers
        on: customer_id = customers.customer_id
  - name: customers
    table: warehouse.customers
    measures: [customer_count]
queries:
  - name: Orders By Status
    from: orders
    group_by: [order_status]
    aggregate: [order_count]
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_yaml_mapping_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "mapping.yaml", YAML_MAPPING);

    let root = load_mapping(&path).unwrap();
    let document = MappingDocument::new(&root).unwrap();
    let artifacts = generate_artifacts(&document).unwrap();

    assert_eq!(artifacts.len(), 3);
    assert_eq!(artifacts[2].path, Path::new("queries/orders_by_status.malloy"));
    assert!(artifacts[0]
        .contents
        .contains("  join_one: customers is customers with customer_id = customers.customer_id\n"));
}

#[test]
fn test_json_and_yaml_score_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = write(&dir, "mapping.yml", YAML_MAPPING);
    let yaml_root = load_mapping(&yaml_path).unwrap();

    let json_path = write(&dir, "mapping.json", &serde_json::to_string(&yaml_root).unwrap());
    let json_root = load_mapping(&json_path).unwrap();

    let inventory = Default::default();
    assert_eq!(
        build_readiness_report(&yaml_root, &inventory).unwrap(),
        build_readiness_report(&json_root, &inventory).unwrap()
    );
}

#[test]
fn test_missing_mapping_file() {
    let err = load_mapping(Path::new("/nonexistent/mapping.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[test]
fn test_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "mapping.yaml", "sources: [unclosed");
    assert!(matches!(load_mapping(&path), Err(LoadError::Yaml(_))));
}

#[test]
fn test_inventory_reads_table_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "hive_tables.csv",
        "database,table_name,row_count\nwh, warehouse.orders ,10\nwh,,0\nwh,warehouse.customers,3\nwh,warehouse.orders,10\n",
    );

    let tables = load_inventory_tables(Some(&path), DEFAULT_INVENTORY_COLUMN).unwrap();
    let tables: Vec<&str> = tables.iter().map(String::as_str).collect();
    assert_eq!(tables, vec!["warehouse.customers", "warehouse.orders"]);
}

#[test]
fn test_inventory_custom_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "inv.csv", "physical_name\nraw.a\nraw.b\n");
    let tables = load_inventory_tables(Some(&path), "physical_name").unwrap();
    assert_eq!(tables.len(), 2);
}

#[test]
fn test_inventory_without_column_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "inv.csv", "name\nraw.a\n");
    assert!(load_inventory_tables(Some(&path), DEFAULT_INVENTORY_COLUMN)
        .unwrap()
        .is_empty());
}

#[test]
fn test_inventory_absent_is_empty() {
    assert!(load_inventory_tables(None, DEFAULT_INVENTORY_COLUMN)
        .unwrap()
        .is_empty());
    assert!(
        load_inventory_tables(Some(Path::new("/nonexistent/inv.csv")), DEFAULT_INVENTORY_COLUMN)
            .unwrap()
            .is_empty()
    );
}
