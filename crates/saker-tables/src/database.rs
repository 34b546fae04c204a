//! The campaign database aggregate.
//!
//! Pure orchestration: owns one table per role, discovers which physical
//! file feeds which table by filename-substring convention, and fans out
//! load/save calls strictly sequentially.

use std::fs;
use std::path::Path;

use crate::objectives::ObjectiveTable;
use crate::records::*;
use crate::table::{SchemaSource, Table};
use crate::{Error, Result};

/// Substring every campaign database file name carries.
pub const FILE_TAG: &str = "FALCON4_";

/// The table a discovered file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Class,
    Damage,
    Aircraft,
    Feature,
    IrSensor,
    Radar,
    RadarWarning,
    Rocket,
    SquadronStores,
    SimWeapon,
    Unit,
    Vehicle,
    VisualSensor,
    Weapon,
    WeaponList,
    Objective,
}

/// Filename-fragment dispatch table, matched case-sensitively against
/// directory entries whose name contains [`FILE_TAG`].
pub const DISPATCH: &[(&str, TableKind)] = &[
    ("_ACD", TableKind::Aircraft),
    ("_CT", TableKind::Class),
    ("_DDP", TableKind::Damage),
    ("_FCD", TableKind::Feature),
    ("_ICD", TableKind::IrSensor),
    ("_OCD", TableKind::Objective),
    ("_RCD", TableKind::Radar),
    ("_RWD", TableKind::RadarWarning),
    ("_RKT", TableKind::Rocket),
    ("_SSD", TableKind::SquadronStores),
    ("_SWD", TableKind::SimWeapon),
    ("_UCD", TableKind::Unit),
    ("_VCD", TableKind::Vehicle),
    ("_VSD", TableKind::VisualSensor),
    ("_WCD", TableKind::Weapon),
    ("_WLD", TableKind::WeaponList),
];

/// Match a file name against the dispatch table.
pub fn match_kind(file_name: &str) -> Option<TableKind> {
    DISPATCH
        .iter()
        .find(|(fragment, _)| file_name.contains(fragment))
        .map(|&(_, kind)| kind)
}

/// Every table of the campaign database.
///
/// Tables whose backing file was absent stay default-initialized; that
/// is only an error at this level when no database file matched at all.
#[derive(Debug, Default)]
pub struct CampaignDatabase {
    pub classes: Table<ClassEntity>,
    pub damage: Table<DamageData>,
    pub aircraft: Table<AircraftData>,
    pub features: Table<FeatureClassData>,
    pub ir_sensors: Table<IrSensorData>,
    pub radars: Table<RadarData>,
    pub radar_warnings: Table<RadarWarningData>,
    pub rockets: Table<RocketData>,
    pub squadron_stores: Table<SquadronStoresData>,
    pub sim_weapons: Table<SimWeaponData>,
    pub units: Table<UnitClassData>,
    pub vehicles: Table<VehicleClassData>,
    pub visual_sensors: Table<VisualSensorData>,
    pub weapons: Table<WeaponClassData>,
    pub weapon_lists: Table<WeaponListData>,
    pub objectives: ObjectiveTable,
}

impl CampaignDatabase {
    /// Create an empty database with every table default-initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a database directory.
    ///
    /// Scans the directory for entries whose name contains [`FILE_TAG`],
    /// dispatches each to its table, and loads them one at a time.
    /// Unmatched entries are ignored.
    pub fn load(dir: &Path, schemas: &SchemaSource) -> Result<Self> {
        let mut db = Self::new();
        let mut matched = 0usize;

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.contains(FILE_TAG) {
                continue;
            }
            let Some(kind) = match_kind(name) else {
                continue;
            };

            tracing::debug!(file = name, ?kind, "loading database file");
            match kind {
                TableKind::Class => db.classes.load(&path, schemas)?,
                TableKind::Damage => db.damage.load(&path, schemas)?,
                TableKind::Aircraft => db.aircraft.load(&path, schemas)?,
                TableKind::Feature => db.features.load(&path, schemas)?,
                TableKind::IrSensor => db.ir_sensors.load(&path, schemas)?,
                TableKind::Radar => db.radars.load(&path, schemas)?,
                TableKind::RadarWarning => db.radar_warnings.load(&path, schemas)?,
                TableKind::Rocket => db.rockets.load(&path, schemas)?,
                TableKind::SquadronStores => db.squadron_stores.load(&path, schemas)?,
                TableKind::SimWeapon => db.sim_weapons.load(&path, schemas)?,
                TableKind::Unit => db.units.load(&path, schemas)?,
                TableKind::Vehicle => db.vehicles.load(&path, schemas)?,
                TableKind::VisualSensor => db.visual_sensors.load(&path, schemas)?,
                TableKind::Weapon => db.weapons.load(&path, schemas)?,
                TableKind::WeaponList => db.weapon_lists.load(&path, schemas)?,
                TableKind::Objective => db.objectives.load(&path, schemas)?,
            };
            matched += 1;
        }

        if matched == 0 {
            return Err(Error::NoDatabaseFiles { dir: dir.to_path_buf() });
        }
        Ok(db)
    }

    /// Save every loaded table into `dir` under the standard file names.
    ///
    /// Default-initialized tables (no backing file was found on load)
    /// are skipped rather than written out as empty documents.
    pub fn save(&self, dir: &Path, schemas: &SchemaSource) -> Result<()> {
        fs::create_dir_all(dir)?;

        macro_rules! save_table {
            ($table:expr, $role:expr) => {
                if !$table.is_default_initialization() {
                    $table.save(&dir.join(format!("{FILE_TAG}{}.xml", $role)), schemas)?;
                }
            };
        }

        save_table!(self.classes, "CT");
        save_table!(self.damage, "DDP");
        save_table!(self.aircraft, "ACD");
        save_table!(self.features, "FCD");
        save_table!(self.ir_sensors, "ICD");
        save_table!(self.radars, "RCD");
        save_table!(self.radar_warnings, "RWD");
        save_table!(self.rockets, "RKT");
        save_table!(self.squadron_stores, "SSD");
        save_table!(self.sim_weapons, "SWD");
        save_table!(self.units, "UCD");
        save_table!(self.vehicles, "VCD");
        save_table!(self.visual_sensors, "VSD");
        save_table!(self.weapons, "WCD");
        save_table!(self.weapon_lists, "WLD");

        if !self.objectives.is_default_initialization() {
            self.objectives.save(&dir.join(format!("{FILE_TAG}OCD")), schemas)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_fragments() {
        assert_eq!(match_kind("FALCON4_WCD.xml"), Some(TableKind::Weapon));
        assert_eq!(match_kind("FALCON4_CT.xml"), Some(TableKind::Class));
        assert_eq!(match_kind("FALCON4_OCD"), Some(TableKind::Objective));
        assert_eq!(match_kind("FALCON4_SSD.xml"), Some(TableKind::SquadronStores));
        assert_eq!(match_kind("README.txt"), None);
        // Case-sensitive by contract.
        assert_eq!(match_kind("FALCON4_wcd.xml"), None);
    }

    #[test]
    fn test_every_role_dispatches_uniquely() {
        for (fragment, kind) in DISPATCH {
            let name = format!("{FILE_TAG}{}.xml", &fragment[1..]);
            assert_eq!(match_kind(&name), Some(*kind), "fragment {fragment}");
        }
    }
}
