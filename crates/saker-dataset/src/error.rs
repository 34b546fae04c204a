//! Error types for row and document handling.

use saker_schema::FieldType;
use thiserror::Error;

/// Errors that can occur while mapping rows or documents.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema-level error.
    #[error("{0}")]
    Schema(#[from] saker_schema::Error),

    /// XML-level parse or write failure.
    #[error("document XML error: {0}")]
    Xml(String),

    /// The document's element structure does not match the schema.
    #[error("unexpected element: expected {expected}, found {found}")]
    UnexpectedElement { expected: String, found: String },

    /// A row carries a column the schema does not declare.
    #[error("unknown column {column}")]
    UnknownColumn { column: String },

    /// A required column is absent from a row.
    #[error("missing required column {column}")]
    MissingColumn { column: String },

    /// A value's type does not match its column's declared type.
    #[error("type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: FieldType,
        found: FieldType,
    },

    /// A column's text could not be parsed as its declared type.
    #[error("cannot parse {value:?} in column {column} as {ty}")]
    Parse {
        column: String,
        value: String,
        ty: FieldType,
    },

    /// A numeric value does not fit the record field it maps to.
    #[error("value {value} in column {column} out of range for {ty}")]
    OutOfRange {
        column: String,
        value: i64,
        ty: &'static str,
    },
}

/// Result type alias using the dataset Error type.
pub type Result<T> = std::result::Result<T, Error>;
