//! Damage data table records (`DDP`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::codes::MOVEMENT_TYPES;
use crate::table::TableRecord;

/// One damage data entry: per-movement-type vulnerability modifiers for
/// a damage type.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageData {
    pub num: u16,
    pub name: String,
    /// Vulnerability modifier per movement type; 255 means "no effect".
    pub modifier: [u8; MOVEMENT_TYPES],
}

impl DamageData {
    /// Sentinel for a modifier slot with no effect.
    pub const MODIFIER_NONE: u8 = 255;
}

impl Default for DamageData {
    fn default() -> Self {
        Self {
            num: 0,
            name: " ".to_string(),
            modifier: [Self::MODIFIER_NONE; MOVEMENT_TYPES],
        }
    }
}

impl TableRecord for DamageData {
    const ROLE: &'static str = "DDP";
    const DATASET: &'static str = "DDPRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::group("Modifier", FieldType::Byte, MOVEMENT_TYPES),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            name: row.get_str("Name")?.to_string(),
            modifier: packed::read_array(row, "Modifier", Self::MODIFIER_NONE)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Name", Value::text(&self.name));
        packed::write_array(&mut row, "Modifier", &self.modifier, Self::MODIFIER_NONE);
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
        let damage = DamageData {
            num: 3,
            name: "HighExplosiveDam".to_string(),
            modifier: [10, 255, 255, 30, 255, 255, 255, 255],
        };
        let row = damage.to_row();

        let schema =
            Schema::from_specs(DamageData::DATASET, DamageData::ROLE, DamageData::COLUMNS);
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(DamageData::from_row(&row).unwrap(), damage);
        // Sentinel slots are omitted.
        assert!(row.get("Modifier_1").is_none());
        assert!(row.get("Modifier_3").is_some());
    }
}
