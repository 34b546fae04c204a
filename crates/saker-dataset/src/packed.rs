//! Packed/indexed column expansion.
//!
//! Several record types carry fixed-size logical arrays that the
//! external representation flattens into one column per index, named
//! `<Base>_<index>`. The encoding is sparse: a slot is written only when
//! it differs from the field's default, and on read every slot is
//! defaulted first and then overwritten by whatever columns are present.
//! Round-trips therefore preserve the set of non-default slots, not the
//! literal column list.

use saker_schema::FieldType;

use crate::{Error, Result, Row, Value};

/// Scalar types that can live in a packed column group.
pub trait PackedScalar: Copy + PartialEq {
    /// The field type of the group's columns.
    const FIELD_TYPE: FieldType;

    /// Convert from a row value, narrowing where the document's column
    /// type is wider than the slot type.
    fn from_value(value: &Value) -> Option<Self>;

    /// Convert into the row value for this slot.
    fn into_value(self) -> Value;
}

impl PackedScalar for u8 {
    const FIELD_TYPE: FieldType = FieldType::Byte;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| u8::try_from(v).ok())
    }

    fn into_value(self) -> Value {
        Value::Byte(self)
    }
}

impl PackedScalar for i16 {
    const FIELD_TYPE: FieldType = FieldType::Int16;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i16::try_from(v).ok())
    }

    fn into_value(self) -> Value {
        Value::Int16(self)
    }
}

impl PackedScalar for u16 {
    const FIELD_TYPE: FieldType = FieldType::UInt16;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| u16::try_from(v).ok())
    }

    fn into_value(self) -> Value {
        Value::UInt16(self)
    }
}

impl PackedScalar for i32 {
    const FIELD_TYPE: FieldType = FieldType::Int32;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn into_value(self) -> Value {
        Value::Int32(self)
    }
}

impl PackedScalar for f32 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

/// Read a fixed-size packed group into an array.
///
/// Every slot starts at `default`; slots whose column is present in the
/// row are overwritten.
pub fn read_array<T: PackedScalar, const N: usize>(
    row: &Row,
    base: &str,
    default: T,
) -> Result<[T; N]> {
    let mut out = [default; N];
    fill(row, base, &mut out)?;
    Ok(out)
}

/// Read a packed group whose capacity is decided at run time.
pub fn read_vec<T: PackedScalar>(
    row: &Row,
    base: &str,
    len: usize,
    default: T,
) -> Result<Vec<T>> {
    let mut out = vec![default; len];
    fill(row, base, &mut out)?;
    Ok(out)
}

fn fill<T: PackedScalar>(row: &Row, base: &str, out: &mut [T]) -> Result<()> {
    for (i, slot) in out.iter_mut().enumerate() {
        let name = format!("{base}_{i}");
        if let Some(value) = row.get(&name) {
            *slot = T::from_value(value).ok_or_else(|| Error::TypeMismatch {
                column: name,
                expected: T::FIELD_TYPE,
                found: value.field_type(),
            })?;
        }
    }
    Ok(())
}

/// Write a packed group sparsely: only slots differing from `default`
/// produce a column.
pub fn write_array<T: PackedScalar>(row: &mut Row, base: &str, values: &[T], default: T) {
    for (i, &value) in values.iter().enumerate() {
        if value != default {
            row.set(format!("{base}_{i}"), value.into_value());
        }
    }
}

/// Highest slot index present in the row for a group, if any.
///
/// Used by tables whose group capacity varies between document
/// generations to pick the right capacity on load.
pub fn max_group_index(row: &Row, base: &str) -> Option<usize> {
    let prefix = format!("{base}_");
    row.names()
        .filter_map(|name| name.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<usize>().ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_round_trip() {
        let values: [i16; 8] = [-1, -1, 12, -1, -1, -1, 3, -1];
        let mut row = Row::new();
        write_array(&mut row, "WeaponId", &values, -1);

        // Only the two non-default slots are present.
        assert_eq!(row.len(), 2);
        assert!(row.get("WeaponId_2").is_some());
        assert!(row.get("WeaponId_6").is_some());
        assert!(row.get("WeaponId_0").is_none());

        let back: [i16; 8] = read_array(&row, "WeaponId", -1).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_read_defaults_absent_slots() {
        let row = Row::new();
        let slots: [u8; 4] = read_array(&row, "Modifier", 255).unwrap();
        assert_eq!(slots, [255; 4]);
    }

    #[test]
    fn test_read_vec_capacity() {
        let mut row = Row::new();
        row.set("Stores_1200", Value::Byte(9));
        assert_eq!(max_group_index(&row, "Stores"), Some(1200));
        let stores = read_vec(&row, "Stores", 2000, 0u8).unwrap();
        assert_eq!(stores[1200], 9);
        assert_eq!(stores.iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_type_mismatch_reported() {
        let mut row = Row::new();
        row.set("Modifier_1", Value::String("oops".to_string()));
        let err = read_array::<u8, 4>(&row, "Modifier", 255).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_float_group() {
        let detection = [0.0f32, 1.25, 0.0, 4.0];
        let mut row = Row::new();
        write_array(&mut row, "Detection", &detection, 0.0);
        assert_eq!(row.len(), 2);
        let back: [f32; 4] = read_array(&row, "Detection", 0.0).unwrap();
        assert_eq!(back, detection);
    }
}
