//! Runtime schemas and static column descriptors.

use std::collections::HashMap;

use crate::{Error, FieldType, Result};

/// Static column descriptor carried by a record type.
///
/// Record types declare their external shape as a `&'static [ColumnSpec]`
/// table. A spec either describes a single scalar column or a packed
/// group that expands to `<name>_0 .. <name>_{len-1}` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name, or the base name of a packed group.
    pub name: &'static str,
    /// Field type of the column (every column of a group shares it).
    pub ty: FieldType,
    /// Whether the column may be absent from a row.
    pub nullable: bool,
    /// Number of expanded columns for a packed group; 0 for a scalar.
    pub group_len: usize,
}

impl ColumnSpec {
    /// A required scalar column.
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, nullable: false, group_len: 0 }
    }

    /// An optional scalar column.
    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, nullable: true, group_len: 0 }
    }

    /// A packed group of `len` columns named `<name>_<index>`.
    ///
    /// Group columns are always nullable: slots holding the field's
    /// default value are omitted from the document entirely.
    pub const fn group(name: &'static str, ty: FieldType, len: usize) -> Self {
        Self { name, ty, nullable: true, group_len: len }
    }
}

/// One column of a runtime schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as it appears in the document.
    pub name: String,
    /// Field type.
    pub ty: FieldType,
    /// Whether the column may be absent from a row.
    pub nullable: bool,
}

/// The authoritative column list for one table's external representation.
///
/// Also carries the two element names the document format needs: the root
/// (dataset) element and the repeating record element.
#[derive(Debug, Clone)]
pub struct Schema {
    dataset: String,
    record: String,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Create an empty schema with the given element names.
    pub fn new(dataset: impl Into<String>, record: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            record: record.into(),
            columns: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a schema from a record type's static descriptor table,
    /// expanding packed groups.
    pub fn from_specs(
        dataset: impl Into<String>,
        record: impl Into<String>,
        specs: &[ColumnSpec],
    ) -> Self {
        let mut schema = Self::new(dataset, record);
        for spec in specs {
            if spec.group_len == 0 {
                schema.push_column(spec.name, spec.ty, spec.nullable);
            } else {
                for i in 0..spec.group_len {
                    schema.push_column(format!("{}_{}", spec.name, i), spec.ty, true);
                }
            }
        }
        schema
    }

    /// Append a column. Later columns with a duplicate name are rejected
    /// by keeping the first index; schemas from trusted descriptors never
    /// hit this.
    pub fn push_column(&mut self, name: impl Into<String>, ty: FieldType, nullable: bool) {
        let name = name.into();
        let idx = self.columns.len();
        self.index.entry(name.clone()).or_insert(idx);
        self.columns.push(Column { name, ty, nullable });
    }

    /// Root (dataset) element name.
    #[inline]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Repeating record element name.
    #[inline]
    pub fn record(&self) -> &str {
        &self.record
    }

    /// All columns in declaration order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Whether the schema declares a column with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Check this schema against a record type's static descriptor.
    ///
    /// The expanded descriptor must match the schema column-for-column:
    /// same names, same order, same types, same nullability. Any
    /// difference is reported as [`Error::SchemaDrift`] naming the first
    /// offending column.
    pub fn verify_specs(&self, specs: &[ColumnSpec]) -> Result<()> {
        let expected = Self::from_specs(self.dataset.clone(), self.record.clone(), specs);

        for (i, want) in expected.columns.iter().enumerate() {
            let Some(got) = self.columns.get(i) else {
                return Err(self.drift(format!(
                    "column {} ({}) missing from schema file",
                    i, want.name
                )));
            };
            if got.name != want.name {
                return Err(self.drift(format!(
                    "column {}: expected {}, schema file has {}",
                    i, want.name, got.name
                )));
            }
            if got.ty != want.ty {
                return Err(self.drift(format!(
                    "column {}: expected type {}, schema file has {}",
                    want.name, want.ty, got.ty
                )));
            }
            if got.nullable != want.nullable {
                return Err(self.drift(format!(
                    "column {}: nullability differs (descriptor: {}, schema file: {})",
                    want.name, want.nullable, got.nullable
                )));
            }
        }
        if self.columns.len() > expected.columns.len() {
            let extra = &self.columns[expected.columns.len()];
            return Err(self.drift(format!(
                "schema file declares extra column {}",
                extra.name
            )));
        }
        Ok(())
    }

    fn drift(&self, detail: String) -> Error {
        Error::SchemaDrift { table: self.record.clone(), detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> &'static [ColumnSpec] {
        const SPECS: &[ColumnSpec] = &[
            ColumnSpec::required("Num", FieldType::UInt16),
            ColumnSpec::optional("Name", FieldType::String),
            ColumnSpec::group("HitChance", FieldType::Byte, 3),
        ];
        SPECS
    }

    #[test]
    fn test_from_specs_expands_groups() {
        let schema = Schema::from_specs("WCDRecords", "WCD", specs());
        let names: Vec<_> = schema.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Num", "Name", "HitChance_0", "HitChance_1", "HitChance_2"]
        );
        assert!(!schema.column("Num").unwrap().nullable);
        assert!(schema.column("HitChance_1").unwrap().nullable);
    }

    #[test]
    fn test_verify_specs_accepts_matching() {
        let schema = Schema::from_specs("WCDRecords", "WCD", specs());
        assert!(schema.verify_specs(specs()).is_ok());
    }

    #[test]
    fn test_verify_specs_rejects_type_change() {
        let mut schema = Schema::new("WCDRecords", "WCD");
        schema.push_column("Num", FieldType::Int32, false);
        schema.push_column("Name", FieldType::String, true);
        for i in 0..3 {
            schema.push_column(format!("HitChance_{i}"), FieldType::Byte, true);
        }
        let err = schema.verify_specs(specs()).unwrap_err();
        assert!(matches!(err, Error::SchemaDrift { .. }));
    }

    #[test]
    fn test_verify_specs_rejects_extra_column() {
        let mut schema = Schema::from_specs("WCDRecords", "WCD", specs());
        schema.push_column("Surprise", FieldType::Int32, true);
        assert!(schema.verify_specs(specs()).is_err());
    }
}
