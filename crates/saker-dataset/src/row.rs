//! Flat row form of a single record.

use std::collections::HashMap;

use crate::{Error, Result, Value};

/// The flat external-representation form of a single record.
///
/// A row holds only the columns that are present; absent nullable
/// columns are simply not in the map. Typed getters perform explicit
/// numeric narrowing so that record mapping works both against
/// schema-typed documents and against the looser column types produced
/// by legacy schema inference.
#[derive(Debug, Clone, Default)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Get a raw column value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterate over present column names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of present columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn required(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
    }

    fn integer(&self, name: &str) -> Result<i64> {
        let value = self.required(name)?;
        value.as_i64().ok_or_else(|| Error::TypeMismatch {
            column: name.to_string(),
            expected: saker_schema::FieldType::Int32,
            found: value.field_type(),
        })
    }

    fn narrow<T: TryFrom<i64>>(&self, name: &str, ty: &'static str) -> Result<T> {
        let wide = self.integer(name)?;
        T::try_from(wide).map_err(|_| Error::OutOfRange {
            column: name.to_string(),
            value: wide,
            ty,
        })
    }

    /// Get a boolean column; integer columns are accepted as non-zero.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.required(name)? {
            Value::Bool(b) => Ok(*b),
            other => Ok(other.as_i64().ok_or_else(|| Error::TypeMismatch {
                column: name.to_string(),
                expected: saker_schema::FieldType::Bool,
                found: other.field_type(),
            })? != 0),
        }
    }

    /// Get an unsigned 8-bit column, narrowing wider integers.
    pub fn get_u8(&self, name: &str) -> Result<u8> {
        self.narrow(name, "u8")
    }

    /// Get a signed 8-bit column, narrowing wider integers.
    pub fn get_i8(&self, name: &str) -> Result<i8> {
        self.narrow(name, "i8")
    }

    /// Get a signed 16-bit column, narrowing wider integers.
    pub fn get_i16(&self, name: &str) -> Result<i16> {
        self.narrow(name, "i16")
    }

    /// Get an unsigned 16-bit column, narrowing wider integers.
    pub fn get_u16(&self, name: &str) -> Result<u16> {
        self.narrow(name, "u16")
    }

    /// Get a signed 32-bit column.
    pub fn get_i32(&self, name: &str) -> Result<i32> {
        self.narrow(name, "i32")
    }

    /// Get an unsigned 32-bit column.
    pub fn get_u32(&self, name: &str) -> Result<u32> {
        self.narrow(name, "u32")
    }

    /// Get a 32-bit float column; doubles and integers are narrowed.
    pub fn get_f32(&self, name: &str) -> Result<f32> {
        let value = self.required(name)?;
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| Error::TypeMismatch {
                column: name.to_string(),
                expected: saker_schema::FieldType::Float,
                found: value.field_type(),
            })
    }

    /// Get a 64-bit float column.
    pub fn get_f64(&self, name: &str) -> Result<f64> {
        let value = self.required(name)?;
        value.as_f64().ok_or_else(|| Error::TypeMismatch {
            column: name.to_string(),
            expected: saker_schema::FieldType::Double,
            found: value.field_type(),
        })
    }

    /// Get a text column.
    pub fn get_str(&self, name: &str) -> Result<&str> {
        match self.required(name)? {
            Value::String(s) => Ok(s),
            other => Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: saker_schema::FieldType::String,
                found: other.field_type(),
            }),
        }
    }

    /// Get an optional signed 16-bit column, defaulting when absent.
    pub fn get_i16_or(&self, name: &str, default: i16) -> Result<i16> {
        if self.get(name).is_none() {
            return Ok(default);
        }
        self.get_i16(name)
    }

    /// Get an optional unsigned 8-bit column, defaulting when absent.
    pub fn get_u8_or(&self, name: &str, default: u8) -> Result<u8> {
        if self.get(name).is_none() {
            return Ok(default);
        }
        self.get_u8(name)
    }

    /// Get an optional 32-bit float column, defaulting when absent.
    pub fn get_f32_or(&self, name: &str, default: f32) -> Result<f32> {
        if self.get(name).is_none() {
            return Ok(default);
        }
        self.get_f32(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_accepts_wider_int() {
        let mut row = Row::new();
        row.set("Domain", Value::Int32(4));
        assert_eq!(row.get_u8("Domain").unwrap(), 4);
    }

    #[test]
    fn test_narrowing_rejects_out_of_range() {
        let mut row = Row::new();
        row.set("Domain", Value::Int32(300));
        assert!(matches!(
            row.get_u8("Domain"),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let row = Row::new();
        assert!(matches!(
            row.get_i16("Strength"),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_f32_accepts_integer_column() {
        let mut row = Row::new();
        row.set("Range", Value::Int32(12));
        assert_eq!(row.get_f32("Range").unwrap(), 12.0);
    }

    #[test]
    fn test_defaulting_getters() {
        let row = Row::new();
        assert_eq!(row.get_i16_or("PtDataIndex", -1).unwrap(), -1);
        assert_eq!(row.get_u8_or("Priority", 255).unwrap(), 255);
        assert_eq!(row.get_f32_or("Angle", 0.0).unwrap(), 0.0);
    }
}
