//! Infrared sensor table records (`ICD`).

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// One infrared sensor entry.
#[derive(Debug, Clone, PartialEq)]
pub struct IrSensorData {
    pub num: u16,
    pub name: String,
    pub nominal_range: f32,
    pub field_of_view: f32,
    pub gimbal_limit: f32,
    pub ground_factor: f32,
    pub flare_chance: f32,
}

impl Default for IrSensorData {
    fn default() -> Self {
        Self {
            num: 0,
            name: " ".to_string(),
            nominal_range: 0.0,
            field_of_view: 0.0,
            gimbal_limit: 0.0,
            ground_factor: 0.0,
            flare_chance: 0.0,
        }
    }
}

impl TableRecord for IrSensorData {
    const ROLE: &'static str = "ICD";
    const DATASET: &'static str = "ICDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("NominalRange", FieldType::Float),
        ColumnSpec::required("FieldOfView", FieldType::Float),
        ColumnSpec::required("GimbalLimit", FieldType::Float),
        ColumnSpec::required("GroundFactor", FieldType::Float),
        ColumnSpec::required("FlareChance", FieldType::Float),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            name: row.get_str("Name")?.to_string(),
            nominal_range: row.get_f32("NominalRange")?,
            field_of_view: row.get_f32("FieldOfView")?,
            gimbal_limit: row.get_f32("GimbalLimit")?,
            ground_factor: row.get_f32("GroundFactor")?,
            flare_chance: row.get_f32("FlareChance")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Name", Value::text(&self.name));
        row.set("NominalRange", Value::Float(self.nominal_range));
        row.set("FieldOfView", Value::Float(self.field_of_view));
        row.set("GimbalLimit", Value::Float(self.gimbal_limit));
        row.set("GroundFactor", Value::Float(self.ground_factor));
        row.set("FlareChance", Value::Float(self.flare_chance));
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
        let sensor = IrSensorData {
            num: 4,
            name: "AN/AAQ-13".to_string(),
            nominal_range: 35.5,
            flare_chance: 0.4,
            ..Default::default()
        };
        let back = IrSensorData::from_row(&sensor.to_row()).unwrap();
        assert_eq!(back, sensor);
    }
}
