//! Saker - Falcon 4 campaign database reading and writing.
//!
//! This crate provides a unified interface to the Saker library
//! ecosystem for working with campaign database XML tables.
//!
//! # Crates
//!
//! - [`saker_schema`] - Column schemas and `.xsd` parsing
//! - [`saker_dataset`] - Schema-validated row sets and the XML document codec
//! - [`saker_tables`] - Typed record tables, the objective directory
//!   codec, and the database aggregate
//!
//! # Example
//!
//! ```no_run
//! use saker::prelude::*;
//!
//! let schemas = SchemaSource::new("XMLSchemas");
//! let db = CampaignDatabase::load("TerrData/objects".as_ref(), &schemas)?;
//! println!("weapons: {}", db.weapons.len());
//!
//! // Mutate and rewrite in full.
//! db.save("TerrData/objects.out".as_ref(), &schemas)?;
//! # Ok::<(), saker_tables::Error>(())
//! ```

// Re-export all sub-crates
pub use saker_dataset as dataset;
pub use saker_schema as schema;
pub use saker_tables as tables;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use saker_dataset::{Row, RowSet, Value};
    pub use saker_schema::{ColumnSpec, FieldType, Schema};
    pub use saker_tables::{
        CampaignDatabase, ObjectiveTable, SchemaSource, Table, TableKind, TableRecord,
    };
}

// Re-export commonly used types at the crate root
pub use saker_tables::{CampaignDatabase, SchemaSource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
