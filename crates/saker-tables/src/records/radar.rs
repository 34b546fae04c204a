//! Radar class table records (`RCD`).

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// One radar class entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarData {
    pub num: u16,
    pub name: String,
    pub rwr_sound: i32,
    pub rwr_symbol: u16,
    pub range: f32,
    pub beam_half_angle: f32,
    pub scan_half_angle: f32,
    pub sweep_rate: f32,
    pub coast_time: u32,
    pub look_down_penalty: f32,
    pub jamming_penalty: f32,
    pub notch_penalty: f32,
    pub notch_speed: f32,
    pub chaff_chance: f32,
    pub flags: u16,
}

impl Default for RadarData {
    fn default() -> Self {
        Self {
            num: 0,
            name: " ".to_string(),
            rwr_sound: 0,
            rwr_symbol: 0,
            range: 0.0,
            beam_half_angle: 0.0,
            scan_half_angle: 0.0,
            sweep_rate: 0.0,
            coast_time: 0,
            look_down_penalty: 0.0,
            jamming_penalty: 0.0,
            notch_penalty: 0.0,
            notch_speed: 0.0,
            chaff_chance: 0.0,
            flags: 0,
        }
    }
}

impl TableRecord for RadarData {
    const ROLE: &'static str = "RCD";
    const DATASET: &'static str = "RCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("RwrSound", FieldType::Int32),
        ColumnSpec::required("RwrSymbol", FieldType::UInt16),
        ColumnSpec::required("Range", FieldType::Float),
        ColumnSpec::required("BeamHalfAngle", FieldType::Float),
        ColumnSpec::required("ScanHalfAngle", FieldType::Float),
        ColumnSpec::required("SweepRate", FieldType::Float),
        ColumnSpec::required("CoastTime", FieldType::UInt32),
        ColumnSpec::required("LookDownPenalty", FieldType::Float),
        ColumnSpec::required("JammingPenalty", FieldType::Float),
        ColumnSpec::required("NotchPenalty", FieldType::Float),
        ColumnSpec::required("NotchSpeed", FieldType::Float),
        ColumnSpec::required("ChaffChance", FieldType::Float),
        ColumnSpec::required("Flags", FieldType::UInt16),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            name: row.get_str("Name")?.to_string(),
            rwr_sound: row.get_i32("RwrSound")?,
            rwr_symbol: row.get_u16("RwrSymbol")?,
            range: row.get_f32("Range")?,
            beam_half_angle: row.get_f32("BeamHalfAngle")?,
            scan_half_angle: row.get_f32("ScanHalfAngle")?,
            sweep_rate: row.get_f32("SweepRate")?,
            coast_time: row.get_u32("CoastTime")?,
            look_down_penalty: row.get_f32("LookDownPenalty")?,
            jamming_penalty: row.get_f32("JammingPenalty")?,
            notch_penalty: row.get_f32("NotchPenalty")?,
            notch_speed: row.get_f32("NotchSpeed")?,
            chaff_chance: row.get_f32("ChaffChance")?,
            flags: row.get_u16("Flags")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Name", Value::text(&self.name));
        row.set("RwrSound", Value::Int32(self.rwr_sound));
        row.set("RwrSymbol", Value::UInt16(self.rwr_symbol));
        row.set("Range", Value::Float(self.range));
        row.set("BeamHalfAngle", Value::Float(self.beam_half_angle));
        row.set("ScanHalfAngle", Value::Float(self.scan_half_angle));
        row.set("SweepRate", Value::Float(self.sweep_rate));
        row.set("CoastTime", Value::UInt32(self.coast_time));
        row.set("LookDownPenalty", Value::Float(self.look_down_penalty));
        row.set("JammingPenalty", Value::Float(self.jamming_penalty));
        row.set("NotchPenalty", Value::Float(self.notch_penalty));
        row.set("NotchSpeed", Value::Float(self.notch_speed));
        row.set("ChaffChance", Value::Float(self.chaff_chance));
        row.set("Flags", Value::UInt16(self.flags));
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
        let radar = RadarData {
            num: 9,
            name: "AN/APG-68".to_string(),
            range: 80.0,
            chaff_chance: 0.25,
            flags: 3,
            ..Default::default()
        };
        assert_eq!(RadarData::from_row(&radar.to_row()).unwrap(), radar);
    }
}
