//! Flat-table load/save machinery.

use std::fs;
use std::path::{Path, PathBuf};

use saker_dataset::{document, Row, RowSet};
use saker_schema::{xsd, ColumnSpec, Schema};

use crate::{Error, Result};

/// Where a table's schema comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// An external `.xsd` file, resolved through [`SchemaSource`].
    /// Missing file is fatal.
    Xsd,
    /// No schema file; the document's own structure is discovered into a
    /// de-facto schema on load. Saves derive a typed schema from the
    /// record's static descriptor.
    Inferred,
}

/// A record type that can live in a [`Table`].
///
/// Each implementation carries its role tag, element names, and a static
/// column descriptor, and maps itself to and from the flat [`Row`] form.
pub trait TableRecord: Sized {
    /// Role tag; also the repeating record element name (e.g. `WCD`).
    const ROLE: &'static str;

    /// Root (dataset) element name (e.g. `WCDRecords`).
    const DATASET: &'static str;

    /// Static column descriptor for this record's external shape.
    const COLUMNS: &'static [ColumnSpec];

    /// How this table's schema is obtained.
    const SCHEMA_MODE: SchemaMode = SchemaMode::Xsd;

    /// Populate a record from its row form.
    fn from_row(row: &Row) -> saker_dataset::Result<Self>;

    /// Render this record as its row form.
    fn to_row(&self) -> Row;

    /// The explicit id column value, for record types that carry one.
    /// Must equal the record's index in its table.
    fn id(&self) -> Option<u32> {
        None
    }

    /// Check a loaded schema against the static descriptor.
    ///
    /// Overridden by tables whose document shape has more than one valid
    /// generation (the squadron stores table).
    fn verify_schema(schema: &Schema) -> saker_schema::Result<()> {
        schema.verify_specs(Self::COLUMNS)
    }
}

/// Explicit schema-directory configuration.
///
/// Passed into table construction rather than resolved from any
/// process-global installation path; one `.xsd` per role lives directly
/// in the directory.
#[derive(Debug, Clone)]
pub struct SchemaSource {
    dir: PathBuf,
}

impl SchemaSource {
    /// Create a schema source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The schema directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the schema file for a role.
    pub fn schema_path(&self, role: &str) -> PathBuf {
        self.dir.join(format!("{role}.xsd"))
    }

    /// Load and parse the schema file for a role.
    pub fn load(&self, role: &str) -> saker_schema::Result<Schema> {
        xsd::load(&self.schema_path(role))
    }
}

/// An insertion-ordered collection of records of one kind.
///
/// Record order is significant: position encodes the record's id in the
/// external representation and is preserved on round-trip.
#[derive(Debug, Clone)]
pub struct Table<R> {
    records: Vec<R>,
    loaded: bool,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { records: Vec::new(), loaded: false }
    }
}

impl<R: TableRecord> Table<R> {
    /// Create an empty, default-initialized table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the table still holds its default-constructed state,
    /// i.e. no backing file was found on load.
    pub fn is_default_initialization(&self) -> bool {
        !self.loaded
    }

    /// Records in index order.
    #[inline]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Mutable access for direct collection mutation by the caller.
    #[inline]
    pub fn records_mut(&mut self) -> &mut Vec<R> {
        &mut self.records
    }

    /// Record at an index.
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Construct a table by loading a backing file.
    pub fn from_file(path: &Path, schemas: &SchemaSource) -> Result<Self> {
        let mut table = Self::new();
        table.load(path, schemas)?;
        Ok(table)
    }

    /// Load the table from `path`.
    ///
    /// A missing or empty backing file leaves the table in its default
    /// state and returns `false`; a missing schema file is always fatal.
    /// Returns `true` iff at least one record resulted. Any malformed
    /// row aborts the whole load — there are no partial tables.
    pub fn load(&mut self, path: &Path, schemas: &SchemaSource) -> Result<bool> {
        self.records.clear();
        self.loaded = false;

        // The schema is load-bearing: resolve and check it before
        // looking at the data file at all.
        let schema = match R::SCHEMA_MODE {
            SchemaMode::Xsd => {
                let schema = schemas.load(R::ROLE)?;
                R::verify_schema(&schema)?;
                Some(schema)
            }
            SchemaMode::Inferred => None,
        };

        if !path.is_file() {
            return Ok(false);
        }
        let text = fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(false);
        }

        let set = match &schema {
            Some(schema) => document::read(&text, schema),
            None => document::read_inferred(&text),
        }
        .map_err(|e| {
            tracing::error!(role = R::ROLE, error = %e, "table document rejected");
            e
        })?;

        for (index, row) in set.rows().iter().enumerate() {
            let record = R::from_row(row).map_err(|e| {
                tracing::error!(
                    role = R::ROLE,
                    index,
                    error = %e,
                    "error occurred while reading a table entry"
                );
                Error::EntryRead { role: R::ROLE, index, source: e }
            })?;
            if let Some(id) = record.id() {
                if id as usize != index {
                    return Err(Error::IdMismatch { role: R::ROLE, index, id });
                }
            }
            self.records.push(record);
        }

        self.loaded = true;
        Ok(!self.records.is_empty())
    }

    /// Save the table to `path`, rewriting the document in full.
    ///
    /// A fresh schema-bound row set is rebuilt and every record's row is
    /// re-validated on insert. Returns `false` iff serialization
    /// produced no bytes; I/O failures are logged and propagated.
    pub fn save(&self, path: &Path, schemas: &SchemaSource) -> Result<bool> {
        let schema = match R::SCHEMA_MODE {
            SchemaMode::Xsd => {
                let schema = schemas.load(R::ROLE)?;
                R::verify_schema(&schema)?;
                schema
            }
            SchemaMode::Inferred => Schema::from_specs(R::DATASET, R::ROLE, R::COLUMNS),
        };

        let mut set = RowSet::new(schema);
        for record in &self.records {
            set.insert(record.to_row())?;
        }

        let bytes = document::write(&set)?;
        if bytes.is_empty() {
            return Ok(false);
        }
        fs::write(path, &bytes).map_err(|e| {
            tracing::error!(role = R::ROLE, path = %path.display(), error = %e, "table save failed");
            e
        })?;
        Ok(true)
    }
}
