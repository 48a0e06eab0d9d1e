//! Inventory of known legacy tables, loaded from a CSV export.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use super::error::LoadError;

/// Set of known physical table names.
pub type InventoryTables = BTreeSet<String>;

/// Column holding the table name in an inventory export.
pub const DEFAULT_INVENTORY_COLUMN: &str = "table_name";

/// Load the table names from an inventory CSV.
///
/// No path, or a path that does not exist, yields an empty inventory. Values
/// are trimmed and blank cells skipped. A file without `column` in its header
/// also yields an empty inventory.
pub fn load_inventory_tables(
    path: Option<&Path>,
    column: &str,
) -> Result<InventoryTables, LoadError> {
    let Some(path) = path else {
        return Ok(InventoryTables::new());
    };
    if !path.exists() {
        warn!(path = %path.display(), "inventory file not found, scoring without inventory");
        return Ok(InventoryTables::new());
    }

    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    let Some(index) = headers.iter().position(|h| h.trim() == column) else {
        warn!(path = %path.display(), column, "inventory has no table column");
        return Ok(InventoryTables::new());
    };

    let mut tables = InventoryTables::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(name) = record.get(index).map(str::trim).filter(|n| !n.is_empty()) {
            tables.insert(name.to_string());
        }
    }

    debug!(path = %path.display(), tables = tables.len(), "loaded inventory");
    Ok(tables)
}
