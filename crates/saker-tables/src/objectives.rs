//! Objective table: the one-to-many directory codec.
//!
//! Objectives are not stored as one flat document. Each objective owns
//! three child collections (features, points, point headers) and the
//! four of them are persisted as sibling documents in one directory per
//! objective:
//!
//! ```text
//! <root>/OCD_00000/OCD_00000.xml   the objective itself (exactly 1 record)
//! <root>/OCD_00000/FED_00000.xml   feature entries
//! <root>/OCD_00000/PDX_00000.xml   points
//! <root>/OCD_00000/PHD_00000.xml   point headers
//! <root>/OCD_00001/...
//! ```
//!
//! The shared 5-digit suffix equals the objective's position in the
//! parent collection. Reading requires all four role files; writing
//! recreates all four and recomputes the derived `FirstPoint` offsets
//! immediately beforehand.

use std::fs;
use std::path::{Path, PathBuf};

use saker_dataset::{packed, Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::codes::MOVEMENT_TYPES;
use crate::table::{SchemaSource, Table, TableRecord};
use crate::{Error, Result};

/// Number of feature slots on a point header.
pub const HEADER_FEATURES: usize = 3;

/// One objective class entry (`OCD`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveClassData {
    pub num: u16,
    pub ct_idx: i16,
    pub data_rate: i16,
    pub deag_distance: i16,
    pub pt_data_index: i16,
    /// Detection range per movement type.
    pub detection: [f32; MOVEMENT_TYPES],
    /// Damage modifier per damage type; 255 means "no effect".
    pub damage_mod: [u8; MOVEMENT_TYPES],
    pub icon_index: i16,
    pub feature_count: u8,
    pub radar_feature: u8,
    pub first_feature: i16,
    pub name: String,
}

impl ObjectiveClassData {
    /// Sentinel for "no point data" / "no first feature".
    pub const NO_INDEX: i16 = -1;
    /// Default detection range for unset slots.
    pub const DETECTION_NONE: f32 = 0.0;
    /// Sentinel for a damage-modifier slot with no effect.
    pub const DAMAGE_MOD_NONE: u8 = 255;
}

impl Default for ObjectiveClassData {
    fn default() -> Self {
        Self {
            num: 0,
            ct_idx: 0,
            data_rate: 0,
            deag_distance: 0,
            pt_data_index: Self::NO_INDEX,
            detection: [Self::DETECTION_NONE; MOVEMENT_TYPES],
            damage_mod: [Self::DAMAGE_MOD_NONE; MOVEMENT_TYPES],
            icon_index: 0,
            feature_count: 0,
            radar_feature: 0,
            first_feature: Self::NO_INDEX,
            name: " ".to_string(),
        }
    }
}

impl TableRecord for ObjectiveClassData {
    const ROLE: &'static str = "OCD";
    const DATASET: &'static str = "OCDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("CtIdx", FieldType::Int16),
        ColumnSpec::required("DataRate", FieldType::Int16),
        ColumnSpec::required("DeagDistance", FieldType::Int16),
        ColumnSpec::optional("PtDataIndex", FieldType::Int16),
        ColumnSpec::group("Detection", FieldType::Float, MOVEMENT_TYPES),
        ColumnSpec::group("DamageMod", FieldType::Byte, MOVEMENT_TYPES),
        ColumnSpec::required("IconIndex", FieldType::Int16),
        ColumnSpec::required("FeatureCount", FieldType::Byte),
        ColumnSpec::required("RadarFeature", FieldType::Byte),
        ColumnSpec::optional("FirstFeature", FieldType::Int16),
        ColumnSpec::required("Name", FieldType::String),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            ct_idx: row.get_i16("CtIdx")?,
            data_rate: row.get_i16("DataRate")?,
            deag_distance: row.get_i16("DeagDistance")?,
            pt_data_index: row.get_i16_or("PtDataIndex", Self::NO_INDEX)?,
            detection: packed::read_array(row, "Detection", Self::DETECTION_NONE)?,
            damage_mod: packed::read_array(row, "DamageMod", Self::DAMAGE_MOD_NONE)?,
            icon_index: row.get_i16("IconIndex")?,
            feature_count: row.get_u8("FeatureCount")?,
            radar_feature: row.get_u8("RadarFeature")?,
            first_feature: row.get_i16_or("FirstFeature", Self::NO_INDEX)?,
            name: row.get_str("Name")?.to_string(),
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("CtIdx", Value::Int16(self.ct_idx));
        row.set("DataRate", Value::Int16(self.data_rate));
        row.set("DeagDistance", Value::Int16(self.deag_distance));
        row.set("PtDataIndex", Value::Int16(self.pt_data_index));
        packed::write_array(&mut row, "Detection", &self.detection, Self::DETECTION_NONE);
        packed::write_array(&mut row, "DamageMod", &self.damage_mod, Self::DAMAGE_MOD_NONE);
        row.set("IconIndex", Value::Int16(self.icon_index));
        row.set("FeatureCount", Value::Byte(self.feature_count));
        row.set("RadarFeature", Value::Byte(self.radar_feature));
        row.set("FirstFeature", Value::Int16(self.first_feature));
        row.set("Name", Value::text(&self.name));
        row
    }

    // The objective's identity is its directory suffix, checked by the
    // directory codec, not the in-file row position.
}

/// One feature entry (`FED`): a placed terrain feature of an objective.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntryData {
    pub num: u16,
    pub feature_ct_idx: i16,
    pub flags: u16,
    pub facing: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub value: u8,
}

impl Default for FeatureEntryData {
    fn default() -> Self {
        Self {
            num: 0,
            feature_ct_idx: 0,
            flags: 0,
            facing: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
            value: 0,
        }
    }
}

impl TableRecord for FeatureEntryData {
    const ROLE: &'static str = "FED";
    const DATASET: &'static str = "FEDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("FeatureCtIdx", FieldType::Int16),
        ColumnSpec::required("Flags", FieldType::UInt16),
        ColumnSpec::required("Facing", FieldType::Float),
        ColumnSpec::required("OffsetX", FieldType::Float),
        ColumnSpec::required("OffsetY", FieldType::Float),
        ColumnSpec::required("OffsetZ", FieldType::Float),
        ColumnSpec::required("Value", FieldType::Byte),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            feature_ct_idx: row.get_i16("FeatureCtIdx")?,
            flags: row.get_u16("Flags")?,
            facing: row.get_f32("Facing")?,
            offset_x: row.get_f32("OffsetX")?,
            offset_y: row.get_f32("OffsetY")?,
            offset_z: row.get_f32("OffsetZ")?,
            value: row.get_u8("Value")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("FeatureCtIdx", Value::Int16(self.feature_ct_idx));
        row.set("Flags", Value::UInt16(self.flags));
        row.set("Facing", Value::Float(self.facing));
        row.set("OffsetX", Value::Float(self.offset_x));
        row.set("OffsetY", Value::Float(self.offset_y));
        row.set("OffsetZ", Value::Float(self.offset_z));
        row.set("Value", Value::Byte(self.value));
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}

/// One point (`PDX`): a navigation/taxi point of an objective.
#[derive(Debug, Clone, PartialEq)]
pub struct PointData {
    pub num: u16,
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
    pub kind: u8,
    pub flags: u16,
}

impl Default for PointData {
    fn default() -> Self {
        Self {
            num: 0,
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
            kind: 0,
            flags: 0,
        }
    }
}

impl TableRecord for PointData {
    const ROLE: &'static str = "PDX";
    const DATASET: &'static str = "PDXRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("XOffset", FieldType::Float),
        ColumnSpec::required("YOffset", FieldType::Float),
        ColumnSpec::required("ZOffset", FieldType::Float),
        ColumnSpec::required("Type", FieldType::Byte),
        ColumnSpec::required("Flags", FieldType::UInt16),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            x_offset: row.get_f32("XOffset")?,
            y_offset: row.get_f32("YOffset")?,
            z_offset: row.get_f32("ZOffset")?,
            kind: row.get_u8("Type")?,
            flags: row.get_u16("Flags")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("XOffset", Value::Float(self.x_offset));
        row.set("YOffset", Value::Float(self.y_offset));
        row.set("ZOffset", Value::Float(self.z_offset));
        row.set("Type", Value::Byte(self.kind));
        row.set("Flags", Value::UInt16(self.flags));
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}

/// One point header (`PHD`): a run of points of one kind.
///
/// `first_point` is derived: the offset of the run's first point in the
/// objective's shared point list. It is recomputed from the preceding
/// headers' `point_count` values on every save.
#[derive(Debug, Clone, PartialEq)]
pub struct PointHeaderData {
    pub num: u16,
    pub obj_id: i16,
    pub kind: u8,
    pub point_count: u8,
    pub first_point: i16,
    pub data: i16,
    pub sin_heading: f32,
    pub cos_heading: f32,
    /// Feature indices tied to this run; 255 marks an empty slot.
    pub features: [u8; HEADER_FEATURES],
}

impl PointHeaderData {
    /// Sentinel for an empty feature slot.
    pub const FEATURE_EMPTY: u8 = 255;
}

impl Default for PointHeaderData {
    fn default() -> Self {
        Self {
            num: 0,
            obj_id: 0,
            kind: 0,
            point_count: 0,
            first_point: 0,
            data: 0,
            sin_heading: 0.0,
            cos_heading: 0.0,
            features: [Self::FEATURE_EMPTY; HEADER_FEATURES],
        }
    }
}

impl TableRecord for PointHeaderData {
    const ROLE: &'static str = "PHD";
    const DATASET: &'static str = "PHDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("ObjId", FieldType::Int16),
        ColumnSpec::required("Type", FieldType::Byte),
        ColumnSpec::required("PointCount", FieldType::Byte),
        ColumnSpec::required("FirstPoint", FieldType::Int16),
        ColumnSpec::required("Data", FieldType::Int16),
        ColumnSpec::required("SinHeading", FieldType::Float),
        ColumnSpec::required("CosHeading", FieldType::Float),
        ColumnSpec::group("Feature", FieldType::Byte, HEADER_FEATURES),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            obj_id: row.get_i16("ObjId")?,
            kind: row.get_u8("Type")?,
            point_count: row.get_u8("PointCount")?,
            first_point: row.get_i16("FirstPoint")?,
            data: row.get_i16("Data")?,
            sin_heading: row.get_f32("SinHeading")?,
            cos_heading: row.get_f32("CosHeading")?,
            features: packed::read_array(row, "Feature", Self::FEATURE_EMPTY)?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("ObjId", Value::Int16(self.obj_id));
        row.set("Type", Value::Byte(self.kind));
        row.set("PointCount", Value::Byte(self.point_count));
        row.set("FirstPoint", Value::Int16(self.first_point));
        row.set("Data", Value::Int16(self.data));
        row.set("SinHeading", Value::Float(self.sin_heading));
        row.set("CosHeading", Value::Float(self.cos_heading));
        packed::write_array(&mut row, "Feature", &self.features, Self::FEATURE_EMPTY);
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}

/// One objective together with its child collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveEntry {
    pub objective: ObjectiveClassData,
    pub features: Vec<FeatureEntryData>,
    pub points: Vec<PointData>,
    pub point_headers: Vec<PointHeaderData>,
}

/// The objective table: directory-per-entry load/save.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveTable {
    entries: Vec<ObjectiveEntry>,
    loaded: bool,
}

impl ObjectiveTable {
    /// Create an empty, default-initialized table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the table still holds its default-constructed state.
    pub fn is_default_initialization(&self) -> bool {
        !self.loaded
    }

    /// Entries in position order.
    #[inline]
    pub fn entries(&self) -> &[ObjectiveEntry] {
        &self.entries
    }

    /// Mutable access for direct collection mutation by the caller.
    #[inline]
    pub fn entries_mut(&mut self) -> &mut Vec<ObjectiveEntry> {
        &mut self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load every objective under `dir`.
    ///
    /// Immediate subdirectories are visited in directory-listing order;
    /// that order is authoritative and is not re-sorted. A subdirectory
    /// with a missing or ambiguous role file aborts the whole load.
    pub fn load(&mut self, dir: &Path, schemas: &SchemaSource) -> Result<bool> {
        self.entries.clear();
        self.loaded = false;

        if !dir.is_dir() {
            return Ok(false);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let loaded = Self::load_entry(&path, schemas).map_err(|e| {
                tracing::error!(dir = %path.display(), error = %e, "objective directory rejected");
                e
            })?;
            self.entries.push(loaded);
        }

        self.loaded = true;
        Ok(!self.entries.is_empty())
    }

    fn load_entry(subdir: &Path, schemas: &SchemaSource) -> Result<ObjectiveEntry> {
        let objectives =
            Table::<ObjectiveClassData>::from_file(&role_file(subdir, "OCD")?, schemas)?;
        let features = Table::<FeatureEntryData>::from_file(&role_file(subdir, "FED")?, schemas)?;
        let points = Table::<PointData>::from_file(&role_file(subdir, "PDX")?, schemas)?;
        let headers = Table::<PointHeaderData>::from_file(&role_file(subdir, "PHD")?, schemas)?;

        if objectives.len() != 1 {
            return Err(Error::ObjectiveCount {
                path: subdir.to_path_buf(),
                count: objectives.len(),
            });
        }

        Ok(ObjectiveEntry {
            objective: objectives.records()[0].clone(),
            features: features.records().to_vec(),
            points: points.records().to_vec(),
            point_headers: headers.records().to_vec(),
        })
    }

    /// Save every objective under `dir`, rewriting all four role files
    /// per entry.
    ///
    /// A failure on any objective aborts the whole save; directories
    /// already written are not rolled back.
    pub fn save(&self, dir: &Path, schemas: &SchemaSource) -> Result<bool> {
        fs::create_dir_all(dir)?;
        for (index, entry) in self.entries.iter().enumerate() {
            Self::save_entry(dir, index, entry, schemas).map_err(|e| {
                tracing::error!(index, error = %e, "objective save failed");
                e
            })?;
        }
        Ok(!self.entries.is_empty())
    }

    fn save_entry(
        dir: &Path,
        index: usize,
        entry: &ObjectiveEntry,
        schemas: &SchemaSource,
    ) -> Result<()> {
        let subdir = dir.join(format!("OCD_{index:05}"));
        fs::create_dir_all(&subdir)?;

        let mut objectives = Table::new();
        objectives.records_mut().push(entry.objective.clone());
        objectives.save(&subdir.join(format!("OCD_{index:05}.xml")), schemas)?;

        let mut features = Table::new();
        *features.records_mut() = entry.features.clone();
        features.save(&subdir.join(format!("FED_{index:05}.xml")), schemas)?;

        let mut points = Table::new();
        *points.records_mut() = entry.points.clone();
        points.save(&subdir.join(format!("PDX_{index:05}.xml")), schemas)?;

        // FirstPoint is derived; recompute it from PointCount in index
        // order immediately before writing.
        let mut recomputed = entry.point_headers.clone();
        let mut offset: i16 = 0;
        for header in &mut recomputed {
            header.first_point = offset;
            offset += i16::from(header.point_count);
        }
        let mut headers = Table::new();
        *headers.records_mut() = recomputed;
        headers.save(&subdir.join(format!("PHD_{index:05}.xml")), schemas)?;

        Ok(())
    }
}

/// Locate exactly one `<role>_*.xml` file in a subdirectory.
fn role_file(subdir: &Path, role: &'static str) -> Result<PathBuf> {
    let pattern = subdir.join(format!("{role}_*.xml"));
    let mut matches: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|m| m.ok())
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        found => Err(Error::RoleFile { role, dir: subdir.to_path_buf(), found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_header_row_round_trip() {
        let header = PointHeaderData {
            num: 2,
            obj_id: 17,
            kind: 5,
            point_count: 8,
            first_point: 12,
            sin_heading: 0.5,
            cos_heading: 0.866,
            features: [1, 255, 255],
            ..Default::default()
        };
        assert_eq!(PointHeaderData::from_row(&header.to_row()).unwrap(), header);
    }

    #[test]
    fn test_objective_row_round_trip() {
        let objective = ObjectiveClassData {
            num: 0,
            ct_idx: 210,
            name: "Airbase".to_string(),
            detection: [0.0, 0.0, 1.5, 0.0, 3.0, 3.0, 0.0, 0.0],
            feature_count: 12,
            ..Default::default()
        };
        assert_eq!(
            ObjectiveClassData::from_row(&objective.to_row()).unwrap(),
            objective
        );
    }
}
