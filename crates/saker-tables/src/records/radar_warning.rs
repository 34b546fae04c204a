//! Radar warning receiver table records (`RWD`).

use saker_dataset::{Row, Value};
use saker_schema::{ColumnSpec, FieldType};

use crate::table::TableRecord;

/// One radar warning receiver entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarWarningData {
    pub num: u16,
    pub name: String,
    pub nominal_range: f32,
    pub sensitivity: f32,
    pub flags: u16,
}

impl Default for RadarWarningData {
    fn default() -> Self {
        Self {
            num: 0,
            name: " ".to_string(),
            nominal_range: 0.0,
            sensitivity: 0.0,
            flags: 0,
        }
    }
}

impl TableRecord for RadarWarningData {
    const ROLE: &'static str = "RWD";
    const DATASET: &'static str = "RWDRecords";
    const COLUMNS: &'static [ColumnSpec] = &[
        ColumnSpec::required("Num", FieldType::UInt16),
        ColumnSpec::required("Name", FieldType::String),
        ColumnSpec::required("NominalRange", FieldType::Float),
        ColumnSpec::required("Sensitivity", FieldType::Float),
        ColumnSpec::required("Flags", FieldType::UInt16),
    ];

    fn from_row(row: &Row) -> saker_dataset::Result<Self> {
        Ok(Self {
            num: row.get_u16("Num")?,
            name: row.get_str("Name")?.to_string(),
            nominal_range: row.get_f32("NominalRange")?,
            sensitivity: row.get_f32("Sensitivity")?,
            flags: row.get_u16("Flags")?,
        })
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.set("Num", Value::UInt16(self.num));
        row.set("Name", Value::text(&self.name));
        row.set("NominalRange", Value::Float(self.nominal_range));
        row.set("Sensitivity", Value::Float(self.sensitivity));
        row.set("Flags", Value::UInt16(self.flags));
        row
    }

    fn id(&self) -> Option<u32> {
        Some(self.num.into())
    }
}
