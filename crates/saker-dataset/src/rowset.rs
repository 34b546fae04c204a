//! Schema-bound row collections.

use saker_schema::Schema;

use crate::{Error, Result, Row};

/// An ordered collection of rows bound to a schema.
///
/// The schema is enforced at the boundary: every row is validated by
/// [`RowSet::insert`] before it is admitted, so a populated row set is
/// known to conform column-for-column. This is the fail-fast step the
/// record constructors rely on — by the time a record maps a row, the
/// row has already been proven against the schema.
#[derive(Debug, Clone)]
pub struct RowSet {
    schema: Schema,
    rows: Vec<Row>,
}

impl RowSet {
    /// Create an empty row set bound to a schema.
    pub fn new(schema: Schema) -> Self {
        Self { schema, rows: Vec::new() }
    }

    /// The schema this row set is bound to.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows in insertion order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the row set holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validate a row against the schema without inserting it.
    ///
    /// Checks, in order: no unknown columns, no missing required
    /// columns, and per-column type agreement. Fails before any caller
    /// could have copied a field.
    pub fn validate(&self, row: &Row) -> Result<()> {
        for name in row.names() {
            if !self.schema.contains(name) {
                return Err(Error::UnknownColumn { column: name.to_string() });
            }
        }
        for column in self.schema.columns() {
            match row.get(&column.name) {
                None if !column.nullable => {
                    return Err(Error::MissingColumn { column: column.name.clone() });
                }
                Some(value) if value.field_type() != column.ty => {
                    return Err(Error::TypeMismatch {
                        column: column.name.clone(),
                        expected: column.ty,
                        found: value.field_type(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate and append a row.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.validate(&row)?;
        self.rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use saker_schema::{ColumnSpec, FieldType};

    fn schema() -> Schema {
        Schema::from_specs(
            "WCDRecords",
            "WCD",
            &[
                ColumnSpec::required("Num", FieldType::UInt16),
                ColumnSpec::required("Name", FieldType::String),
                ColumnSpec::optional("Strength", FieldType::Int16),
            ],
        )
    }

    fn valid_row() -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(0));
        row.set("Name", Value::text("AIM-9"));
        row
    }

    #[test]
    fn test_insert_valid_row() {
        let mut set = RowSet::new(schema());
        set.insert(valid_row()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rejects_unknown_column() {
        let mut set = RowSet::new(schema());
        let mut row = valid_row();
        row.set("Bogus", Value::Int32(1));
        assert!(matches!(
            set.insert(row),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_rejects_missing_required_column() {
        let mut set = RowSet::new(schema());
        let mut row = Row::new();
        row.set("Num", Value::UInt16(0));
        assert!(matches!(
            set.insert(row),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_rejects_type_mismatch() {
        let mut set = RowSet::new(schema());
        let mut row = valid_row();
        row.set("Strength", Value::Float(1.0));
        assert!(matches!(
            set.insert(row),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
