//! Squadron stores table records (`SSD`).

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType, Schema};

use crate::table::TableRecord;

/// Stores capacity of the current document shape.
pub const STORES: usize = 1000;

/// Stores capacity of the legacy document shape.
pub const LEGACY_STORES: usize = 2000;

/// One squadron stores entry: available rounds per weapon index.
///
/// The stores capacity follows the document generation the table was
/// loaded from (1000 current, 2000 legacy); default-constructed entries
/// use the current capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadronStoresData {
    pub num: u16,
    pub infinite_air_ground: u8,
    pub infinite_air_air: u8,
    pub infinite_gun: u8,
    /// Rounds on hand per weapon index; 0 means none stocked.
    pub stores: Vec<u8>,
}

impl SquadronStoresData {
    /// Legacy descriptor with the 2000-slot stores group.
    pub const COLUMNS_LEGACY: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("InfiniteAG", FieldType::Byte),
        ColumnSpec::required("InfiniteAA", FieldType::Byte),
        ColumnSpec::required("InfiniteGun", FieldType::Byte),
        ColumnSpec::group("Stores", FieldType::Byte, LEGACY_STORES),
    ];
}

impl Default for SquadronStoresData {
    fn default() -> Self {
        Self {
            num: 0,
            infinite_air_ground: 0,
            infinite_air_air: 0,
            infinite_gun: 0,
            stores: vec![0; STORES],
        }
    }
}

impl TableRecord for SquadronStoresData {
    const ROLE: &'static str = "SSD";
    const DATASET: &'static str = "SSDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("InfiniteAG", FieldType::Byte),
        ColumnSpec::required("InfiniteAA", FieldType::Byte),
        ColumnSpec::required("InfiniteGun", FieldType::Byte),
        ColumnSpec::group("Stores", FieldType::Byte, STORES),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        // Capacity follows the document: any slot index at or past the
        // current bound means the legacy 2000-slot shape.
        let capacity = match packed::max_group_index(row, "Stores") {
            Some(max) if max >= STORES => LEGACY_STORES,
            _ => STORES,
        };
        Ok(Self {
            num: row.get_u16("Num")?,
            infinite_air_ground: row.get_u8("InfiniteAG")?,
            infinite_air_air: row.get_u8("InfiniteAA")?,
            infinite_gun: row.get_u8("InfiniteGun")?,
            stores: packed::read_vec(row, "Stores", capacity, 0)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("InfiniteAG", Value::Byte(self.infinite_air_ground));
        row.set("InfiniteAA", Value::Byte(self.infinite_air_air));
        row.set("InfiniteGun", Value::Byte(self.infinite_gun));
        packed::write_array(&mut row, "Stores", &self.stores, 0);
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }

    fn verify_schema(schema: &Schema) -> saker_schema::Result<()> {
        // Both document generations are valid shapes for this table.
        schema
            .verify_specs(Self::COLUMNS)
            .or_else(|_| schema.verify_specs(Self::COLUMNS_LEGACY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saker_dataset::RowSet;

    #[test]
    fn test_sparse_round_trip() {
        let mut stores = SquadronStoresData { num: 0, ..Default::default() };
        stores.stores[88] = 24;
        stores.stores[204] = 6;

        let row = stores.to_row();
        assert_eq!(row.len(), 6);

        let schema = Schema::from_specs(
            SquadronStoresData::DATASET,
            SquadronStoresData::ROLE,
            SquadronStoresData::COLUMNS,
        );
        RowSet::new(schema).insert(row.clone()).unwrap();

        assert_eq!(SquadronStoresData::from_row(&row).unwrap(), stores);
    }

    #[test]
    fn test_legacy_capacity_detected() {
        let mut row = SquadronStoresData::default().to_row();
        row.set("Stores_1500", Value::Byte(3));
        let stores = SquadronStoresData::from_row(&row).unwrap();
        assert_eq!(stores.stores.len(), LEGACY_STORES);
        assert_eq!(stores.stores[1500], 3);
    }

    #[test]
    fn test_both_schema_generations_verify() {
        let current = Schema::from_specs(
            SquadronStoresData::DATASET,
            SquadronStoresData::ROLE,
            SquadronStoresData::COLUMNS,
        );
        let legacy = Schema::from_specs(
            SquadronStoresData::DATASET,
            SquadronStoresData::ROLE,
            SquadronStoresData::COLUMNS_LEGACY,
        );
        assert!(SquadronStoresData::verify_schema(&current).is_ok());
        assert!(SquadronStoresData::verify_schema(&legacy).is_ok());
    }
}
