//! Typed record tables for the Falcon 4 campaign database.
//!
//! Each table role (`WCD`, `UCD`, `OCD`, …) has a record type here with a
//! static column descriptor and a `from_row`/`to_row` mapping; [`Table`]
//! provides the shared flat-document load/save, [`ObjectiveTable`] the
//! directory-per-entry codec, and [`CampaignDatabase`] the aggregate that
//! discovers and drives every table in a database directory.
//!
//! # Example
//!
//! ```no_run
//! use saker_tables::{CampaignDatabase, SchemaSource};
//!
//! let schemas = SchemaSource::new("XMLSchemas");
//! let db = CampaignDatabase::load("TerrData/objects".as_ref(), &schemas)?;
//! println!("{} weapons", db.weapons.len());
//! # Ok::<(), saker_tables::Error>(())
//! ```

mod codes;
mod database;
mod error;
mod objectives;
pub mod records;
mod table;

pub use codes::{DamageType, MovementType, MOVEMENT_TYPES};
pub use database::{match_kind, CampaignDatabase, TableKind, DISPATCH, FILE_TAG};
pub use error::{Error, Result};
pub use objectives::{
    FeatureEntryData, ObjectiveClassData, ObjectiveEntry, ObjectiveTable, PointData,
    PointHeaderData, HEADER_FEATURES,
};
pub use records::*;
pub use table::{SchemaMode, SchemaSource, Table, TableRecord};
