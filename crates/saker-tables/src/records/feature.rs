//! Feature class table records (`FCD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::codes::MOVEMENT_TYPES;
use crate::table::TableRecord;

/// One terrain-feature class entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureClassData {
    pub num: u16,
    pub ct_idx: i16,
    pub repair_time: i16,
    pub priority: u8,
    pub flags: u16,
    pub name: String,
    pub hit_points: i16,
    pub height: i16,
    pub angle: f32,
    pub radar_type: i16,
    /// Detection range per movement type.
    pub detection: [f32; MOVEMENT_TYPES],
    /// Damage modifier per damage type; 255 means "no effect".
    pub damage_mod: [u8; MOVEMENT_TYPES],
}

impl FeatureClassData {
    /// Sentinel for "no radar".
    pub const NO_RADAR: i16 = -1;
    /// Default detection range for unset slots.
    pub const DETECTION_NONE: f32 = 0.0;
    /// Sentinel for a damage-modifier slot with no effect.
    pub const DAMAGE_MOD_NONE: u8 = 255;
}

impl Default for FeatureClassData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            repair_time: 0,
            priority: 0,
            flags: 0,
            name: " ".to_string(),
            hit_points: 0,
            height: 0,
            angle: 0.0,
            radar_type: Self::NO_RADAR,
            detection: [Self::DETECTION_NONE; MOVEMENT_TYPES],
            damage_mod: [Self::DAMAGE_MOD_NONE; MOVEMENT_TYPES],
        }
    }
}

impl TableRecord for FeatureClassData {
    const ROLE: &'static str = "FCD";
    const DATASET: &'static str = "FCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("RepairTime", FieldType::Int16),
        ColumnSpec::required("Priority", FieldType::Byte),
        ColumnSpec::required("Flags", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("HitPoints", FieldType::Int16),
        ColumnSpec::required("Height", FieldType::Int16),
        ColumnSpec::required("Angle", FieldType::Float),
        ColumnSpec::optional("RadarType", FieldType::Int16),
        ColumnSpec::group("Detection", FieldType::Float, MOVEMENT_TYPES),
        ColumnSpec::group("DamageMod", FieldType::Byte, MOVEMENT_TYPES),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            repair_time: row.get_i16("RepairTime")?,
            priority: row.get_u8("Priority")?,
            flags: row.get_u16("Flags")?,
            name: row.get_str("Name")?.to_string(),
            hit_points: row.get_i16("HitPoints")?,
            height: row.get_i16("Height")?,
            angle: row.get_f32("Angle")?,
            radar_type: row.get_i16_or("RadarType", Self::NO_RADAR)?,
            detection: packed::read_array(row, "Detection", Self::DETECTION_NONE)?,
            damage_mod: packed::read_array(row, "DamageMod", Self::DAMAGE_MOD_NONE)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("RepairTime", Value::Int16(self.repair_time));
        row.set("Priority", Value::Byte(self.priority));
        row.set("Flags", Value::UInt16(self.flags));
        row.set("Name", Value::text(&self.name));
        row.set("HitPoints", Value::Int16(self.hit_points));
        row.set("Height", Value::Int16(self.height));
        row.set("Angle", Value::Float(self.angle));
        row.set("RadarType", Value::Int16(self.radar_type));
        packed::write_array(&mut row, "Detection", &self.detection, Self::DETECTION_NONE);
        packed::write_array(&mut row, "DamageMod", &self.damage_mod, Self::DAMAGE_MOD_NONE);
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
        let feature = FeatureClassData {
            num: 2,
            name: "Runway".to_string(),
            hit_points: 400,
            height: 12,
            detection: [0.0, 0.0, 0.0, 0.0, 2.5, 4.0, 0.0, 0.0],
            damage_mod: [40, 255, 255, 255, 255, 255, 255, 255],
            ..Default::default()
        };
        let row = feature.to_row();

        let schema = Schema::from_specs(
            FeatureClassData::DATASET,
            FeatureClassData::ROLE,
            FeatureClassData::COLUMNS,
        );
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(FeatureClassData::from_row(&row).unwrap(), feature);
    }
}
