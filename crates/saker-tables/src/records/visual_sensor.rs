//! Visual sensor table records (`VSD`).

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// One visual sensor entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSensorData {
    pub num: u16,
    pub name: String,
    pub nominal_range: f32,
    /// View-frustum half-angles, degrees.
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for VisualSensorData {
    fn default() -> Self {
        Self {
            num: 0,
            name: " ".to_string(),
            nominal_range: 0.0,
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
        }
    }
}

impl TableRecord for VisualSensorData {
    const ROLE: &'static str = "VSD";
    const DATASET: &'static str = "VSDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("NominalRange", FieldType::Float),
        ColumnSpec::required("Top", FieldType::Float),
        ColumnSpec::required("Bottom", FieldType::Float),
        ColumnSpec::required("Left", FieldType::Float),
        ColumnSpec::required("Right", FieldType::Float),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            name: row.get_str("Name")?.to_string(),
            nominal_range: row.get_f32("NominalRange")?,
            top: row.get_f32("Top")?,
            bottom: row.get_f32("Bottom")?,
            left: row.get_f32("Left")?,
            right: row.get_f32("Right")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Name", Value::text(&self.name));
        row.set("NominalRange", Value::Float(self.nominal_range));
        row.set("Top", Value::Float(self.top));
        row.set("Bottom", Value::Float(self.bottom));
        row.set("Left", Value::Float(self.left));
        row.set("Right", Value::Float(self.right));
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_round_trip() {
        let sensor = VisualSensorData {
            num: 0,
            name: "Mk1 Eyeball".to_string(),
            nominal_range: 8.0,
            top: 45.0,
            bottom: -30.0,
            left: -120.0,
            right: 120.0,
        };
        assert_eq!(VisualSensorData::from_row(&sensor.to_row()).unwrap(), sensor);
    }
}
