//! Schema definitions for campaign database tables.
//!
//! Every table in the campaign database is shaped by a schema: an ordered
//! list of named, typed, optionally-nullable columns. The schema is the
//! load-bearing contract for the XML documents on disk — reading or
//! writing data that does not conform fails, it is never coerced.
//!
//! Schemas come from two places:
//!
//! - An external `.xsd` file next to the database (one per table role),
//!   parsed by [`xsd::parse`].
//! - A static [`ColumnSpec`] descriptor table carried by each record
//!   type, expanded by [`Schema::from_specs`]. The two are cross-checked
//!   at load time so schema drift surfaces as a structured error.

mod error;
mod schema;
mod types;
pub mod xsd;

pub use error::{Error, Result};
pub use schema::{Column, ColumnSpec, Schema};
pub use types::FieldType;
