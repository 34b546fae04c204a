//! Error types for table loading and saving.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving campaign database tables.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema-level error (missing schema file, drift, malformed XSD).
    #[error("{0}")]
    Schema(#[from] saker_schema::Error),

    /// Row/document-level error outside of record mapping.
    #[error("{0}")]
    Dataset(#[from] saker_dataset::Error),

    /// Record mapping failed; the table load is aborted with role
    /// context so the caller knows which table was in flight.
    #[error("error occurred while reading a {role} entry (index {index})")]
    EntryRead {
        role: &'static str,
        index: usize,
        #[source]
        source: saker_dataset::Error,
    },

    /// A record's explicit id column disagrees with its position.
    #[error("{role} entry at index {index} carries id {id}")]
    IdMismatch {
        role: &'static str,
        index: usize,
        id: u32,
    },

    /// An objective subdirectory does not hold exactly one file for a
    /// role prefix.
    #[error("expected exactly one {role} file in {dir} (found {found})")]
    RoleFile {
        role: &'static str,
        dir: PathBuf,
        found: usize,
    },

    /// An objective document holds the wrong number of records.
    #[error("objective document {path} holds {count} records (expected 1)")]
    ObjectiveCount { path: PathBuf, count: usize },

    /// Invalid wildcard pattern while locating role files.
    #[error("bad role-file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The database directory contains no campaign database files at all.
    #[error("no FALCON4_ database files found in {dir}")]
    NoDatabaseFiles { dir: PathBuf },
}

/// Result type alias using the tables Error type.
pub type Result<T> = std::result::Result<T, Error>;
