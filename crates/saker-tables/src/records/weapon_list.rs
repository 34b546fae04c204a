//! Weapon list table records (`WLD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// Number of rack slots in a weapon list.
pub const RACK_SLOTS: usize = 64;

/// One weapon list entry: a loadout template of up to 64 rack slots.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponListData {
    pub num: u16,
    /// Weapon id per rack slot; -1 marks an empty slot.
    pub weapon_id: [i16; RACK_SLOTS],
    /// Rounds per rack slot.
    pub weapon_count: [u8; RACK_SLOTS],
}

impl WeaponListData {
    /// Sentinel for an empty rack slot.
    pub const RACK_EMPTY: i16 = -1;
}

impl Default for WeaponListData {
    fn default() -> Self {
        Self {
            num: 0,
            weapon_id: [Self::RACK_EMPTY; RACK_SLOTS],
            weapon_count: [0; RACK_SLOTS],
        }
    }
}

impl TableRecord for WeaponListData {
    const ROLE: &'static str = "WLD";
    const DATASET: &'static str = "WLDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::group("WeaponId", FieldType::Int16, RACK_SLOTS),
        ColumnSpec::group("WeaponCount", FieldType::Byte, RACK_SLOTS),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            weapon_id: packed::read_array(row, "WeaponId", Self::RACK_EMPTY)?,
            weapon_count: packed::read_array(row, "WeaponCount", 0)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        packed::write_array(&mut row, "WeaponId", &self.weapon_id, Self::RACK_EMPTY);
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

    #[test]
    fn test_sparse_round_trip() {
        let mut list = WeaponListData { num: 6, ..Default::default() };
        list.weapon_id[3] = 42;
        list.weapon_count[3] = 2;
        list.weapon_id[63] = 7;
        list.weapon_count[63] = 1;

        let row = list.to_row();
        assert_eq!(row.len(), 5);
        assert_eq!(WeaponListData::from_row(&row).unwrap(), list);
    }
}
