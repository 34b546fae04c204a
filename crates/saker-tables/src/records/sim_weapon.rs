//! Simulation weapon table records (`SWD`).

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// One simulation weapon entry: the physical constants the flight model
/// needs for a launched store.
#[derive(Debug, Clone, PartialEq)]
pub struct SimWeaponData {
    pub num: u16,
    pub flags: i32,
    /// Drag coefficient.
    pub drag: f32,
    /// Launch weight, pounds.
    pub weight: f32,
    /// Reference area, square feet.
    pub area: f32,
    /// Ejection velocities, feet per second.
    pub x_ejection: f32,
    pub y_ejection: f32,
    pub z_ejection: f32,
    /// Cockpit mnemonic, e.g. `AIM9M`.
    pub mnemonic: String,
    pub weapon_class: i32,
    pub weapon_domain: i32,
    pub weapon_type: i32,
    pub data_idx: i32,
}

impl Default for SimWeaponData {
    fn default() -> Self {
        Self {
            num: 0,
            flags: 0,
            drag: 0.0,
            weight: 0.0,
            area: 0.0,
            x_ejection: 0.0,
            y_ejection: 0.0,
            z_ejection: 0.0,
            mnemonic: " ".to_string(),
            weapon_class: 0,
            weapon_domain: 0,
            weapon_type: 0,
            data_idx: 0,
        }
    }
}

impl TableRecord for SimWeaponData {
    const ROLE: &'static str = "SWD";
    const DATASET: &'static str = "SWDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Flags", FieldType::Int32),
        ColumnSpec::required("Drag", FieldType::Float),
        ColumnSpec::required("Weight", FieldType::Float),
        ColumnSpec::required("Area", FieldType::Float),
        ColumnSpec::required("XEjection", FieldType::Float),
        ColumnSpec::required("YEjection", FieldType::Float),
        ColumnSpec::required("ZEjection", FieldType::Float),
        ColumnSpec::required("Mnemonic", FieldType::String),
        ColumnSpec::required("WeaponClass", FieldType::Int32),
        ColumnSpec::required("WeaponDomain", FieldType::Int32),
        ColumnSpec::required("WeaponType", FieldType::Int32),
        ColumnSpec::required("DataIdx", FieldType::Int32),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            flags: row.get_i32("Flags")?,
            drag: row.get_f32("Drag")?,
            weight: row.get_f32("Weight")?,
            area: row.get_f32("Area")?,
            x_ejection: row.get_f32("XEjection")?,
            y_ejection: row.get_f32("YEjection")?,
            z_ejection: row.get_f32("ZEjection")?,
            mnemonic: row.get_str("Mnemonic")?.to_string(),
            weapon_class: row.get_i32("WeaponClass")?,
            weapon_domain: row.get_i32("WeaponDomain")?,
            weapon_type: row.get_i32("WeaponType")?,
            data_idx: row.get_i32("DataIdx")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Flags", Value::Int32(self.flags));
        row.set("Drag", Value::Float(self.drag));
        row.set("Weight", Value::Float(self.weight));
        row.set("Area", Value::Float(self.area));
        row.set("XEjection", Value::Float(self.x_ejection));
        row.set("YEjection", Value::Float(self.y_ejection));
        row.set("ZEjection", Value::Float(self.z_ejection));
        row.set("Mnemonic", Value::text(&self.mnemonic));
        row.set("WeaponClass", Value::Int32(self.weapon_class));
        row.set("WeaponDomain", Value::Int32(self.weapon_domain));
        row.set("WeaponType", Value::Int32(self.weapon_type));
        row.set("DataIdx", Value::Int32(self.data_idx));
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
        let weapon = SimWeaponData {
            num: 5,
            drag: 0.012,
            weight: 190.5,
            area: 0.11,
            z_ejection: -10.0,
            mnemonic: "AIM9M".to_string(),
            ..Default::default()
        };
        assert_eq!(SimWeaponData::from_row(&weapon.to_row()).unwrap(), weapon);
    }

    #[test]
    fn test_physical_fields_render_fixed() {
        let weapon = SimWeaponData { drag: 0.012, ..Default::default() };
        let row = weapon.to_row();
        assert_eq!(row.get("Drag").unwrap().render(), "0.012");
        assert_eq!(row.get("Weight").unwrap().render(), "0.000");
    }
}
