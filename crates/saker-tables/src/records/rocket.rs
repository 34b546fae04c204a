//! Rocket pod table records (`RKT`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// Number of rack slots in a rocket pod.
pub const POD_SLOTS: usize = 100;

/// One rocket pod entry: the weapons seated in each pod rack slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketData {
    pub num: u16,
    pub pod_ct_idx: i16,
    /// Weapon id per rack slot; -1 marks an empty slot.
    pub weapon_id: [i16; POD_SLOTS],
    /// Rounds per rack slot.
    pub weapon_count: [u8; POD_SLOTS],
}

impl RocketData {
    /// Sentinel for an empty rack slot.
    pub const RACK_EMPTY: i16 = -1;
}

impl Default for RocketData {
    fn default() -> Self {
        Self {
            num: 0,
            pod_ct_idx: 0,
            weapon_id: [Self::RACK_EMPTY; POD_SLOTS],
            weapon_count: [0; POD_SLOTS],
        }
    }
}

impl TableRecord for RocketData {
    const ROLE: &'static str = "RKT";
    const DATASET: &'static str = "RKTRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("PodCtIdx", FieldType::Int16),
        ColumnSpec::group("WeaponId", FieldType::Int16, POD_SLOTS),
        ColumnSpec::group("WeaponCount", FieldType::Byte, POD_SLOTS),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            pod_ct_idx: row.get_i16("PodCtIdx")?,
            weapon_id: packed::read_array(row, "WeaponId", Self::RACK_EMPTY)?,
            weapon_count: packed::read_array(row, "WeaponCount", 0)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("PodCtIdx", Value::Int16(self.pod_ct_idx));
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
    use saker_dataset::RowSet;
    use saker_schema::Schema;

    #[test]
    fn test_sparse_rack_round_trip() {
        let mut rocket = RocketData { num: 2, pod_ct_idx: 300, ..Default::default() };
        rocket.weapon_id[0] = 88;
        rocket.weapon_count[0] = 19;
        rocket.weapon_id[57] = 91;
        rocket.weapon_count[57] = 7;

        let row = rocket.to_row();
        // Two ids, two counts, plus Num and PodCtIdx.
        assert_eq!(row.len(), 6);

        let schema =
            Schema::from_specs(RocketData::DATASET, RocketData::ROLE, RocketData::COLUMNS);
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(RocketData::from_row(&row).unwrap(), rocket);
    }
}
