//! Aircraft data table records (`ACD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// Number of sensor slots on an aircraft.
pub const SENSOR_SLOTS: usize = 5;

/// One aircraft data entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftData {
    pub num: u16,
    pub ct_idx: i16,
    pub combat_class: i32,
    pub airframe_idx: i32,
    pub signature_idx: i32,
    /// Sensor kind per slot; -1 marks an empty slot.
    pub sensor_type: [i16; SENSOR_SLOTS],
    /// Index into the matching sensor table per slot.
    pub sensor_idx: [i16; SENSOR_SLOTS],
}

impl AircraftData {
    /// Sentinel for an empty sensor slot.
    pub const SENSOR_EMPTY: i16 = -1;
}

impl Default for AircraftData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            combat_class: 0,
            airframe_idx: 0,
            signature_idx: 0,
            sensor_type: [Self::SENSOR_EMPTY; SENSOR_SLOTS],
            sensor_idx: [Self::SENSOR_EMPTY; SENSOR_SLOTS],
        }
    }
}

impl TableRecord for AircraftData {
    const ROLE: &'static str = "ACD";
    const DATASET: &'static str = "ACDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("CombatClass", FieldType::Int32),
        ColumnSpec::required("AirframeIdx", FieldType::Int32),
        ColumnSpec::required("SignatureIdx", FieldType::Int32),
        ColumnSpec::group("SensorType", FieldType::Int16, SENSOR_SLOTS),
        ColumnSpec::group("SensorIdx", FieldType::Int16, SENSOR_SLOTS),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            combat_class: row.get_i32("CombatClass")?,
            airframe_idx: row.get_i32("AirframeIdx")?,
            signature_idx: row.get_i32("SignatureIdx")?,
            sensor_type: packed::read_array(row, "SensorType", Self::SENSOR_EMPTY)?,
            sensor_idx: packed::read_array(row, "SensorIdx", Self::SENSOR_EMPTY)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("CombatClass", Value::Int32(self.combat_class));
        row.set("AirframeIdx", Value::Int32(self.airframe_idx));
        row.set("SignatureIdx", Value::Int32(self.signature_idx));
        packed::write_array(&mut row, "SensorType", &self.sensor_type, Self::SENSOR_EMPTY);
        packed::write_array(&mut row, "SensorIdx", &self.sensor_idx, Self::SENSOR_EMPTY);
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saker_dataset::RowSet;
    use saker_schema::Schema;

    #[test]
    fn test_row_round_trip() {
        let aircraft = AircraftData {
            num: 7,
            ct_idx: 120,
            combat_class: 2,
            sensor_type: [3, -1, -1, 1, -1],
            sensor_idx: [12, -1, -1, 0, -1],
            ..Default::default()
        };
        let row = aircraft.to_row();

        let schema =
            Schema::from_specs(AircraftData::DATASET, AircraftData::ROLE, AircraftData::COLUMNS);
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(AircraftData::from_row(&row).unwrap(), aircraft);
    }

    #[test]
    fn test_empty_slots_are_omitted() {
        let row = AircraftData::default().to_row();
        assert!(row.get("SensorType_0").is_none());
        assert!(row.get("SensorIdx_4").is_none());
    }
}
