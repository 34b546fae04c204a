//! Vehicle class table records (`VCD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// Number of hardpoints on a vehicle.
pub const HARDPOINTS: usize = 16;

/// One vehicle class entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleClassData {
    pub num: u16,
    pub ct_idx: i16,
    pub hit_points: i16,
    pub flags: u32,
    pub name: String,
    /// Non-cooperative target recognition string.
    pub nctr: String,
    pub rcs_factor: f32,
    pub max_weight: i32,
    pub empty_weight: i32,
    pub fuel_weight: i32,
    pub fuel_rate: i16,
    pub engine_sound: i16,
    pub max_altitude: i16,
    pub min_altitude: i16,
    pub cruise_altitude: i16,
    pub max_speed: i16,
    pub radar_type: i16,
    pub number_of_pilots: u8,
    pub visible_flags: u16,
    pub callsign_index: u8,
    pub callsign_slots: u8,
    /// Weapon id per hardpoint; 0 marks an empty hardpoint.
    pub weapon_id: [i16; HARDPOINTS],
    /// Rounds per hardpoint.
    pub weapon_count: [u8; HARDPOINTS],
}

impl VehicleClassData {
    /// Sentinel for an empty hardpoint.
    pub const HARDPOINT_EMPTY: i16 = 0;
    /// Sentinel for "no radar".
    pub const NO_RADAR: i16 = -1;
}

impl Default for VehicleClassData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            hit_points: 0,
            flags: 0,
            name: " ".to_string(),
            nctr: " ".to_string(),
            rcs_factor: 0.0,
            max_weight: 0,
            empty_weight: 0,
            fuel_weight: 0,
            fuel_rate: 0,
            engine_sound: 0,
            max_altitude: 0,
            min_altitude: 0,
            cruise_altitude: 0,
            max_speed: 0,
            radar_type: Self::NO_RADAR,
            number_of_pilots: 0,
            visible_flags: 0,
            callsign_index: 0,
            callsign_slots: 0,
            weapon_id: [Self::HARDPOINT_EMPTY; HARDPOINTS],
            weapon_count: [0; HARDPOINTS],
        }
    }
}

impl TableRecord for VehicleClassData {
    const ROLE: &'static str = "VCD";
    const DATASET: &'static str = "VCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("HitPoints", FieldType::Int16),
        ColumnSpec::required("Flags", FieldType::UInt32),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("Nctr", FieldType::String),
        ColumnSpec::required("RcsFactor", FieldType::Float),
        ColumnSpec::required("MaxWeight", FieldType::Int32),
        ColumnSpec::required("EmptyWeight", FieldType::Int32),
        ColumnSpec::required("FuelWeight", FieldType::Int32),
        ColumnSpec::required("FuelRate", FieldType::Int16),
        ColumnSpec::required("EngineSound", FieldType::Int16),
        ColumnSpec::required("MaxAltitude", FieldType::Int16),
        ColumnSpec::required("MinAltitude", FieldType::Int16),
        ColumnSpec::required("CruiseAltitude", FieldType::Int16),
        ColumnSpec::required("MaxSpeed", FieldType::Int16),
        ColumnSpec::optional("RadarType", FieldType::Int16),
        ColumnSpec::required("NumberOfPilots", FieldType::Byte),
        ColumnSpec::required("VisibleFlags", FieldType::UInt16),
        ColumnSpec::required("CallsignIndex", FieldType::Byte),
        ColumnSpec::required("CallsignSlots", FieldType::Byte),
        ColumnSpec::group("WeaponId", FieldType::Int16, HARDPOINTS),
        ColumnSpec::group("WeaponCount", FieldType::Byte, HARDPOINTS),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            hit_points: row.get_i16("HitPoints")?,
            flags: row.get_u32("Flags")?,
            name: row.get_str("Name")?.to_string(),
            nctr: row.get_str("Nctr")?.to_string(),
            rcs_factor: row.get_f32("RcsFactor")?,
            max_weight: row.get_i32("MaxWeight")?,
            empty_weight: row.get_i32("EmptyWeight")?,
            fuel_weight: row.get_i32("FuelWeight")?,
            fuel_rate: row.get_i16("FuelRate")?,
            engine_sound: row.get_i16("EngineSound")?,
            max_altitude: row.get_i16("MaxAltitude")?,
            min_altitude: row.get_i16("MinAltitude")?,
            cruise_altitude: row.get_i16("CruiseAltitude")?,
            max_speed: row.get_i16("MaxSpeed")?,
            radar_type: row.get_i16_or("RadarType", Self::NO_RADAR)?,
            number_of_pilots: row.get_u8("NumberOfPilots")?,
            visible_flags: row.get_u16("VisibleFlags")?,
            callsign_index: row.get_u8("CallsignIndex")?,
            callsign_slots: row.get_u8("CallsignSlots")?,
            weapon_id: packed::read_array(row, "WeaponId", Self::HARDPOINT_EMPTY)?,
            weapon_count: packed::read_array(row, "WeaponCount", 0)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("HitPoints", Value::Int16(self.hit_points));
        row.set("Flags", Value::UInt32(self.flags));
        row.set("Name", Value::text(&self.name));
        row.set("Nctr", Value::text(&self.nctr));
        row.set("RcsFactor", Value::Float(self.rcs_factor));
        row.set("MaxWeight", Value::Int32(self.max_weight));
        row.set("EmptyWeight", Value::Int32(self.empty_weight));
        row.set("FuelWeight", Value::Int32(self.fuel_weight));
        row.set("FuelRate", Value::Int16(self.fuel_rate));
        row.set("EngineSound", Value::Int16(self.engine_sound));
        row.set("MaxAltitude", Value::Int16(self.max_altitude));
        row.set("MinAltitude", Value::Int16(self.min_altitude));
        row.set("CruiseAltitude", Value::Int16(self.cruise_altitude));
        row.set("MaxSpeed", Value::Int16(self.max_speed));
        row.set("RadarType", Value::Int16(self.radar_type));
        row.set("NumberOfPilots", Value::Byte(self.number_of_pilots));
        row.set("VisibleFlags", Value::UInt16(self.visible_flags));
        row.set("CallsignIndex", Value::Byte(self.callsign_index));
        row.set("CallsignSlots", Value::Byte(self.callsign_slots));
        packed::write_array(&mut row, "WeaponId", &self.weapon_id, Self::HARDPOINT_EMPTY);
        packed::write_array(&mut row, "WeaponCount", &self.weapon_count, 0);
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
        let mut vehicle = VehicleClassData {
            num: 20,
            ct_idx: 101,
            hit_points: 60,
            name: "T-62".to_string(),
            nctr: "T62".to_string(),
            max_speed: 28,
            number_of_pilots: 3,
            ..Default::default()
        };
        vehicle.weapon_id[0] = 204;
        vehicle.weapon_count[0] = 40;

        let row = vehicle.to_row();
        let schema = Schema::from_specs(
            VehicleClassData::DATASET,
            VehicleClassData::ROLE,
            VehicleClassData::COLUMNS,
        );
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(VehicleClassData::from_row(&row).unwrap(), vehicle);
    }
}
