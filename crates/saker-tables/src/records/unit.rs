//! Unit class table records (`UCD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// Number of element slots in a unit.
pub const ELEMENT_SLOTS: usize = 16;

/// One unit class entry: a ground/air/naval unit template and the
/// vehicle elements it is composed of.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitClassData {
    pub num: u16,
    pub ct_idx: i16,
    pub name: String,
    /// Movement type code; see [`crate::MovementType`].
    pub movement_type: i32,
    pub movement_speed: i16,
    pub max_range: i16,
    pub fuel: i32,
    pub fuel_rate: i16,
    pub pt_data_index: i16,
    pub flags: u32,
    pub main_role: u8,
    pub squadron_stores_idx: i16,
    /// Vehicle class index per element slot; -1 marks an empty slot.
    pub element_type: [i16; ELEMENT_SLOTS],
    /// Vehicles per element slot.
    pub element_count: [u8; ELEMENT_SLOTS],
}

impl UnitClassData {
    /// Sentinel for an empty element slot.
    pub const ELEMENT_EMPTY: i16 = -1;
    /// Sentinel for "no point data" / "no squadron stores".
    pub const NO_INDEX: i16 = -1;
}

impl Default for UnitClassData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            name: " ".to_string(),
            movement_type: 0,
            movement_speed: 0,
            max_range: 0,
            fuel: 0,
            fuel_rate: 0,
            pt_data_index: Self::NO_INDEX,
            flags: 0,
            main_role: 0,
            squadron_stores_idx: Self::NO_INDEX,
            element_type: [Self::ELEMENT_EMPTY; ELEMENT_SLOTS],
            element_count: [0; ELEMENT_SLOTS],
        }
    }
}

impl TableRecord for UnitClassData {
    const ROLE: &'static str = "UCD";
    const DATASET: &'static str = "UCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("MovementType", FieldType::Int32),
        ColumnSpec::required("MovementSpeed", FieldType::Int16),
        ColumnSpec::required("MaxRange", FieldType::Int16),
        ColumnSpec::required("Fuel", FieldType::Int32),
        ColumnSpec::required("FuelRate", FieldType::Int16),
        ColumnSpec::optional("PtDataIndex", FieldType::Int16),
        ColumnSpec::required("Flags", FieldType::UInt32),
        ColumnSpec::required("MainRole", FieldType::Byte),
        ColumnSpec::optional("SquadronStoresIdx", FieldType::Int16),
        ColumnSpec::group("ElementType", FieldType::Int16, ELEMENT_SLOTS),
        ColumnSpec::group("ElementCount", FieldType::Byte, ELEMENT_SLOTS),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            name: row.get_str("Name")?.to_string(),
            movement_type: row.get_i32("MovementType")?,
            movement_speed: row.get_i16("MovementSpeed")?,
            max_range: row.get_i16("MaxRange")?,
            fuel: row.get_i32("Fuel")?,
            fuel_rate: row.get_i16("FuelRate")?,
            pt_data_index: row.get_i16_or("PtDataIndex", Self::NO_INDEX)?,
            flags: row.get_u32("Flags")?,
            main_role: row.get_u8("MainRole")?,
            squadron_stores_idx: row.get_i16_or("SquadronStoresIdx", Self::NO_INDEX)?,
            element_type: packed::read_array(row, "ElementType", Self::ELEMENT_EMPTY)?,
            element_count: packed::read_array(row, "ElementCount", 0)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("Name", Value::text(&self.name));
        row.set("MovementType", Value::Int32(self.movement_type));
        row.set("MovementSpeed", Value::Int16(self.movement_speed));
        row.set("MaxRange", Value::Int16(self.max_range));
        row.set("Fuel", Value::Int32(self.fuel));
        row.set("FuelRate", Value::Int16(self.fuel_rate));
        row.set("PtDataIndex", Value::Int16(self.pt_data_index));
        row.set("Flags", Value::UInt32(self.flags));
        row.set("MainRole", Value::Byte(self.main_role));
        row.set("SquadronStoresIdx", Value::Int16(self.squadron_stores_idx));
        packed::write_array(&mut row, "ElementType", &self.element_type, Self::ELEMENT_EMPTY);
        packed::write_array(&mut row, "ElementCount", &self.element_count, 0);
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
        let mut unit = UnitClassData {
            num: 11,
            ct_idx: 540,
            name: "Armor Battalion".to_string(),
            movement_type: 3,
            movement_speed: 20,
            ..Default::default()
        };
        unit.element_type[0] = 101;
        unit.element_count[0] = 12;
        unit.element_type[1] = 104;
        unit.element_count[1] = 4;

        let row = unit.to_row();
        let schema =
            Schema::from_specs(UnitClassData::DATASET, UnitClassData::ROLE, UnitClassData::COLUMNS);
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(UnitClassData::from_row(&row).unwrap(), unit);
    }

    #[test]
    fn test_older_documents_without_optional_columns_load() {
        let mut row = UnitClassData { num: 0, ..Default::default() }.to_row();
        // Simulate a hand-edited document that dropped the optional columns.
        let mut stripped = Row::new();
        for name in ["Num", "CtIdx", "Name", "MovementType", "MovementSpeed", "MaxRange", "Fuel", "FuelRate", "Flags", "MainRole"] {
            stripped.set(name, row.get(name).unwrap().clone());
        }
        row = stripped;

        let unit = UnitClassData::from_row(&row).unwrap();
        assert_eq!(unit.pt_data_index, UnitClassData::NO_INDEX);
        assert_eq!(unit.squadron_stores_idx, UnitClassData::NO_INDEX);
    }
}
