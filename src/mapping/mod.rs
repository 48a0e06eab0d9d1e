//! Mapping documents: the generic value tree supplied by the caller and the
//! typed views the renderers and the scorer read from it.
//!
//! ```text
//! YAML / JSON text ──[loader]──▶ serde_json::Value ──▶ MappingDocument
//!                                                       │
//!                                     sources[] ◀───────┴───────▶ queries[]
//! ```

pub mod definition;
pub mod document;
pub mod error;
pub mod inventory;
pub mod item;
pub mod loader;
pub mod value;

pub use definition::{JoinDefinition, JoinTarget, QueryDefinition, Relationship, SourceDefinition};
pub use document::MappingDocument;
pub use error::{LoadError, MappingError, MappingResult};
pub use inventory::{load_inventory_tables, InventoryTables, DEFAULT_INVENTORY_COLUMN};
pub use item::{items_field, iter_items, Item};
pub use loader::{load_mapping, parser_for_path, JsonParser, MappingParser, YamlParser};
