//! Weapon class table records (`WCD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::codes::MOVEMENT_TYPES;
use crate::table::TableRecord;

/// One weapon class entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponClassData {
    pub num: u16,
    pub ct_idx: i16,
    pub strength: i16,
    /// Damage type code; see [`crate::DamageType`].
    pub damage_type: i32,
    pub range: f32,
    pub fire_rate: f32,
    pub rariety: u8,
    pub guidance_flags: u16,
    pub collective: u8,
    pub rack_group: i16,
    pub weight: u16,
    pub drag_index: f32,
    pub blast_radius: f32,
    pub radar_type: i16,
    pub sim_data_idx: i16,
    pub max_altitude: i16,
    pub min_altitude: i16,
    pub bullet_ttl: f32,
    pub bullet_velocity: f32,
    pub bullet_dispersion: f32,
    pub name: String,
    /// Hit chance per movement type, percent.
    pub hit_chance: [u8; MOVEMENT_TYPES],
}

impl WeaponClassData {
    /// Unset hit-chance slots never hit.
    pub const HIT_CHANCE_EMPTY: u8 = 0;
    /// Sentinel for "no radar" / "no sim data".
    pub const NO_INDEX: i16 = -1;
}

impl Default for WeaponClassData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            strength: 0,
            damage_type: 0,
            range: 0.0,
            fire_rate: 0.0,
            rariety: 0,
            guidance_flags: 0,
            collective: 0,
            rack_group: 0,
            weight: 0,
            drag_index: 0.0,
            blast_radius: 0.0,
            radar_type: Self::NO_INDEX,
            sim_data_idx: Self::NO_INDEX,
            max_altitude: 0,
            min_altitude: 0,
            bullet_ttl: 0.0,
            bullet_velocity: 0.0,
            bullet_dispersion: 0.0,
            name: " ".to_string(),
            hit_chance: [Self::HIT_CHANCE_EMPTY; MOVEMENT_TYPES],
        }
    }
}

impl TableRecord for WeaponClassData {
    const ROLE: &'static str = "WCD";
    const DATASET: &'static str = "WCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("Strength", FieldType::Int16),
        ColumnSpec::required("DamageType", FieldType::Int32),
        ColumnSpec::required("Range", FieldType::Float),
        ColumnSpec::required("FireRate", FieldType::Float),
        ColumnSpec::required("Rariety", FieldType::Byte),
        ColumnSpec::required("GuidanceFlags", FieldType::UInt16),
        ColumnSpec::required("Collective", FieldType::Byte),
        ColumnSpec::required("RackGroup", FieldType::Int16),
        ColumnSpec::required("Weight", FieldType::UInt16),
        ColumnSpec::required("DragIndex", FieldType::Float),
        ColumnSpec::required("BlastRadius", FieldType::Float),
        ColumnSpec::optional("RadarType", FieldType::Int16),
        ColumnSpec::optional("SimDataIdx", FieldType::Int16),
        ColumnSpec::required("MaxAltitude", FieldType::Int16),
        ColumnSpec::required("MinAltitude", FieldType::Int16),
        ColumnSpec::required("BulletTTL", FieldType::Float),
        ColumnSpec::required("BulletVelocity", FieldType::Float),
        ColumnSpec::required("BulletDispersion", FieldType::Float),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::group("HitChance", FieldType::Byte, MOVEMENT_TYPES),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            strength: row.get_i16("Strength")?,
            damage_type: row.get_i32("DamageType")?,
            range: row.get_f32("Range")?,
            fire_rate: row.get_f32("FireRate")?,
            rariety: row.get_u8("Rariety")?,
            guidance_flags: row.get_u16("GuidanceFlags")?,
            collective: row.get_u8("Collective")?,
            rack_group: row.get_i16("RackGroup")?,
            weight: row.get_u16("Weight")?,
            drag_index: row.get_f32("DragIndex")?,
            blast_radius: row.get_f32("BlastRadius")?,
            radar_type: row.get_i16_or("RadarType", Self::NO_INDEX)?,
            sim_data_idx: row.get_i16_or("SimDataIdx", Self::NO_INDEX)?,
            max_altitude: row.get_i16("MaxAltitude")?,
            min_altitude: row.get_i16("MinAltitude")?,
            bullet_ttl: row.get_f32("BulletTTL")?,
            bullet_velocity: row.get_f32("BulletVelocity")?,
            bullet_dispersion: row.get_f32("BulletDispersion")?,
            name: row.get_str("Name")?.to_string(),
            hit_chance: packed::read_array(row, "HitChance", Self::HIT_CHANCE_EMPTY)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("Strength", Value::Int16(self.strength));
        row.set("DamageType", Value::Int32(self.damage_type));
        row.set("Range", Value::Float(self.range));
        row.set("FireRate", Value::Float(self.fire_rate));
        row.set("Rariety", Value::Byte(self.rariety));
        row.set("GuidanceFlags", Value::UInt16(self.guidance_flags));
        row.set("Collective", Value::Byte(self.collective));
        row.set("RackGroup", Value::Int16(self.rack_group));
        row.set("Weight", Value::UInt16(self.weight));
        row.set("DragIndex", Value::Float(self.drag_index));
        row.set("BlastRadius", Value::Float(self.blast_radius));
        row.set("RadarType", Value::Int16(self.radar_type));
        row.set("SimDataIdx", Value::Int16(self.sim_data_idx));
        row.set("MaxAltitude", Value::Int16(self.max_altitude));
        row.set("MinAltitude", Value::Int16(self.min_altitude));
        row.set("BulletTTL", Value::Float(self.bullet_ttl));
        row.set("BulletVelocity", Value::Float(self.bullet_velocity));
        row.set("BulletDispersion", Value::Float(self.bullet_dispersion));
        row.set("Name", Value::text(&self.name));
        packed::write_array(&mut row, "HitChance", &self.hit_chance, Self::HIT_CHANCE_EMPTY);
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}
