//! Error types for schema handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or checking a table schema.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema file does not exist. Schemas are load-bearing and are
    /// never inferred for tables that declare one.
    #[error("missing schema file: {path}")]
    MissingSchema { path: PathBuf },

    /// XML-level parse failure in a schema document.
    #[error("schema XML error: {0}")]
    Xml(String),

    /// A column declared a type the table contract does not know.
    #[error("unsupported column type: {0}")]
    UnsupportedType(String),

    /// Structurally invalid schema document.
    #[error("malformed schema: {0}")]
    Malformed(String),

    /// The on-disk schema does not match the record's static descriptor.
    #[error("schema drift in table {table}: {detail}")]
    SchemaDrift { table: String, detail: String },
}

/// Result type alias using the schema Error type.
pub type Result<T> = std::result::Result<T, Error>;
