//! Class table records (`CT`).
//!
//! The class table is the legacy table of the set: it ships without a
//! schema file, so its shape is discovered from the document itself and
//! the field mapping leans on the row getters' numeric narrowing. Saves
//! derive a typed schema from the static descriptor below.

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::{SchemaMode, TableRecord};

/// One class table entry: the type taxonomy and bookkeeping shared by
/// every campaign entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntity {
    pub num: u16,
    /// Taxonomy bytes: domain / class / type / sub-type / specific / owner.
    pub domain: u8,
    pub class: u8,
    pub kind: u8,
    pub sub_type: u8,
    pub specific: u8,
    pub owner: u8,
    pub update_rate: u32,
    pub update_tolerance: u32,
    pub fine_update_range: f32,
    pub fine_update_force_range: f32,
    pub fine_update_multiplier: f32,
    pub damage_seed: u32,
    pub hit_points: i32,
    pub major_revision: u16,
    pub minor_revision: u16,
    pub create_priority: u16,
    pub management_domain: u8,
    pub transferable: bool,
    pub private: bool,
    pub tangible: bool,
    pub collidable: bool,
    pub global: bool,
    pub persistent: bool,
    pub graphics_normal: i16,
    pub graphics_repaired: i16,
    pub graphics_damaged: i16,
    pub graphics_destroyed: i16,
    pub mover_definition_data: i32,
    pub entity_idx: i16,
}

impl ClassEntity {
    /// Sentinel for "no table entry" in `entity_idx`.
    pub const NO_ENTITY: i16 = -1;
}

impl Default for ClassEntity {
    fn default() -> Self {
        Self {
            num: 0,
            domain: 0,
            class: 0,
            kind: 0,
            sub_type: 0,
            specific: 0,
            owner: 0,
            update_rate: 0,
            update_tolerance: 0,
            fine_update_range: 0.0,
            fine_update_force_range: 0.0,
            fine_update_multiplier: 0.0,
            damage_seed: 0,
            hit_points: 0,
            major_revision: 0,
            minor_revision: 0,
            create_priority: 0,
            management_domain: 0,
            transferable: false,
            private: false,
            tangible: false,
            collidable: false,
            global: false,
            persistent: false,
            graphics_normal: 0,
            graphics_repaired: 0,
            graphics_damaged: 0,
            graphics_destroyed: 0,
            mover_definition_data: 0,
            entity_idx: Self::NO_ENTITY,
        }
    }
}

impl TableRecord for ClassEntity {
    const ROLE: &'static str = "CT";
    const DATASET: &'static str = "CTRecords";
    const SCHEMA_MODE: SchemaMode = SchemaMode::Inferred;
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Domain", FieldType::Byte),
        ColumnSpec::required("Class", FieldType::Byte),
        ColumnSpec::required("Type", FieldType::Byte),
        ColumnSpec::required("SubType", FieldType::Byte),
        ColumnSpec::required("Specific", FieldType::Byte),
        ColumnSpec::required("Owner", FieldType::Byte),
        ColumnSpec::required("UpdateRate", FieldType::UInt32),
        ColumnSpec::required("UpdateTolerance", FieldType::UInt32),
        ColumnSpec::required("FineUpdateRange", FieldType::Float),
        ColumnSpec::required("FineUpdateForceRange", FieldType::Float),
        ColumnSpec::required("FineUpdateMultiplier", FieldType::Float),
        ColumnSpec::required("DamageSeed", FieldType::UInt32),
        ColumnSpec::required("HitPoints", FieldType::Int32),
        ColumnSpec::required("MajorRevision", FieldType::UInt16),
        ColumnSpec::required("MinorRevision", FieldType::UInt16),
        ColumnSpec::required("CreatePriority", FieldType::UInt16),
        ColumnSpec::required("ManagementDomain", FieldType::Byte),
        ColumnSpec::required("Transferable", FieldType::Bool),
        ColumnSpec::required("Private", FieldType::Bool),
        ColumnSpec::required("Tangible", FieldType::Bool),
        ColumnSpec::required("Collidable", FieldType::Bool),
        ColumnSpec::required("Global", FieldType::Bool),
        ColumnSpec::required("Persistent", FieldType::Bool),
        ColumnSpec::required("GraphicsNormal", FieldType::Int16),
        ColumnSpec::required("GraphicsRepaired", FieldType::Int16),
        ColumnSpec::required("GraphicsDamaged", FieldType::Int16),
        ColumnSpec::required("GraphicsDestroyed", FieldType::Int16),
        ColumnSpec::required("MoverDefinitionData", FieldType::Int32),
        ColumnSpec::required("EntityIdx", FieldType::Int16),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            domain: row.get_u8("Domain")?,
            class: row.get_u8("Class")?,
            kind: row.get_u8("Type")?,
            sub_type: row.get_u8("SubType")?,
            specific: row.get_u8("Specific")?,
            owner: row.get_u8("Owner")?,
            update_rate: row.get_u32("UpdateRate")?,
            update_tolerance: row.get_u32("UpdateTolerance")?,
            fine_update_range: row.get_f32("FineUpdateRange")?,
            fine_update_force_range: row.get_f32("FineUpdateForceRange")?,
            fine_update_multiplier: row.get_f32("FineUpdateMultiplier")?,
            damage_seed: row.get_u32("DamageSeed")?,
            hit_points: row.get_i32("HitPoints")?,
            major_revision: row.get_u16("MajorRevision")?,
            minor_revision: row.get_u16("MinorRevision")?,
            create_priority: row.get_u16("CreatePriority")?,
            management_domain: row.get_u8("ManagementDomain")?,
            transferable: row.get_bool("Transferable")?,
            private: row.get_bool("Private")?,
            tangible: row.get_bool("Tangible")?,
            collidable: row.get_bool("Collidable")?,
            global: row.get_bool("Global")?,
            persistent: row.get_bool("Persistent")?,
            graphics_normal: row.get_i16("GraphicsNormal")?,
            graphics_repaired: row.get_i16("GraphicsRepaired")?,
            graphics_damaged: row.get_i16("GraphicsDamaged")?,
            graphics_destroyed: row.get_i16("GraphicsDestroyed")?,
            mover_definition_data: row.get_i32("MoverDefinitionData")?,
            entity_idx: row.get_i16("EntityIdx")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Domain", Value::Byte(self.domain));
        row.set("Class", Value::Byte(self.class));
        row.set("Type", Value::Byte(self.kind));
        row.set("SubType", Value::Byte(self.sub_type));
        row.set("Specific", Value::Byte(self.specific));
        row.set("Owner", Value::Byte(self.owner));
        row.set("UpdateRate", Value::UInt32(self.update_rate));
        row.set("UpdateTolerance", Value::UInt32(self.update_tolerance));
        row.set("FineUpdateRange", Value::Float(self.fine_update_range));
        row.set("FineUpdateForceRange", Value::Float(self.fine_update_force_range));
        row.set("FineUpdateMultiplier", Value::Float(self.fine_update_multiplier));
        row.set("DamageSeed", Value::UInt32(self.damage_seed));
        row.set("HitPoints", Value::Int32(self.hit_points));
        row.set("MajorRevision", Value::UInt16(self.major_revision));
        row.set("MinorRevision", Value::UInt16(self.minor_revision));
        row.set("CreatePriority", Value::UInt16(self.create_priority));
        row.set("ManagementDomain", Value::Byte(self.management_domain));
        row.set("Transferable", Value::Bool(self.transferable));
        row.set("Private", Value::Bool(self.private));
        row.set("Tangible", Value::Bool(self.tangible));
        row.set("Collidable", Value::Bool(self.collidable));
        row.set("Global", Value::Bool(self.global));
        row.set("Persistent", Value::Bool(self.persistent));
        row.set("GraphicsNormal", Value::Int16(self.graphics_normal));
        row.set("GraphicsRepaired", Value::Int16(self.graphics_repaired));
        row.set("GraphicsDamaged", Value::Int16(self.graphics_damaged));
        row.set("GraphicsDestroyed", Value::Int16(self.graphics_destroyed));
        row.set("MoverDefinitionData", Value::Int32(self.mover_definition_data));
        row.set("EntityIdx", Value::Int16(self.entity_idx));
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
        let entity = ClassEntity {
            num: 15,
            domain: 4,
            class: 2,
            kind: 1,
            hit_points: 100,
            transferable: true,
            collidable: true,
            entity_idx: 7,
            ..Default::default()
        };
        assert_eq!(ClassEntity::from_row(&entity.to_row()).unwrap(), entity);
    }

    #[test]
    fn test_tolerates_inferred_integer_columns() {
        // A document loaded without a schema types everything it can as
        // Int32; the getters must narrow.
        let mut row = ClassEntity::default().to_row();
        row.set("Domain", Value::Int32(4));
        row.set("Transferable", Value::Int32(1));
        let entity = ClassEntity::from_row(&row).unwrap();
        assert_eq!(entity.domain, 4);
        assert!(entity.transferable);
    }
}
