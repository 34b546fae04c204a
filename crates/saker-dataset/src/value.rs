//! Typed field values.

use saker_schema::FieldType;

use crate::{Error, Result};

/// One typed field value from a table row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean, encoded as 0/1 in documents.
    Bool(bool),
    /// Unsigned 8-bit integer.
    Byte(u8),
    /// Signed 8-bit integer.
    SByte(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Text value.
    String(String),
}

impl Value {
    /// Build a text value, substituting a single space for an empty or
    /// whitespace-only string. The external format disallows a truly
    /// empty value in a required text column.
    pub fn text(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::String(" ".to_string())
        } else {
            Self::String(s.to_string())
        }
    }

    /// The field type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Bool(_) => FieldType::Bool,
            Self::Byte(_) => FieldType::Byte,
            Self::SByte(_) => FieldType::SByte,
            Self::Int16(_) => FieldType::Int16,
            Self::UInt16(_) => FieldType::UInt16,
            Self::Int32(_) => FieldType::Int32,
            Self::UInt32(_) => FieldType::UInt32,
            Self::Float(_) => FieldType::Float,
            Self::Double(_) => FieldType::Double,
            Self::String(_) => FieldType::String,
        }
    }

    /// Render this value as document text.
    ///
    /// Booleans render as 0/1 and `f32` values with exactly 3 decimal
    /// places; both are required for reproducible round-trips.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Self::Byte(v) => v.to_string(),
            Self::SByte(v) => v.to_string(),
            Self::Int16(v) => v.to_string(),
            Self::UInt16(v) => v.to_string(),
            Self::Int32(v) => v.to_string(),
            Self::UInt32(v) => v.to_string(),
            Self::Float(v) => format!("{v:.3}"),
            Self::Double(v) => v.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Parse document text as a value of the given type.
    pub fn parse(column: &str, text: &str, ty: FieldType) -> Result<Self> {
        let err = || Error::Parse {
            column: column.to_string(),
            value: text.to_string(),
            ty,
        };
        let t = text.trim();
        match ty {
            FieldType::Bool => match t {
                "0" | "false" => Ok(Self::Bool(false)),
                "1" | "true" => Ok(Self::Bool(true)),
                _ => Err(err()),
            },
            FieldType::Byte => t.parse().map(Self::Byte).map_err(|_| err()),
            FieldType::SByte => t.parse().map(Self::SByte).map_err(|_| err()),
            FieldType::Int16 => t.parse().map(Self::Int16).map_err(|_| err()),
            FieldType::UInt16 => t.parse().map(Self::UInt16).map_err(|_| err()),
            FieldType::Int32 => t.parse().map(Self::Int32).map_err(|_| err()),
            FieldType::UInt32 => t.parse().map(Self::UInt32).map_err(|_| err()),
            FieldType::Float => t.parse().map(Self::Float).map_err(|_| err()),
            FieldType::Double => t.parse().map(Self::Double).map_err(|_| err()),
            // Blank text collapses to the single-space placeholder, the
            // same substitution the write side applies.
            FieldType::String => Ok(Self::text(text)),
        }
    }

    /// Widen any integer variant to `i64`.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Byte(v) => Some(i64::from(*v)),
            Self::SByte(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::UInt16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::UInt32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Widen any numeric variant to `f64`.
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }
}
