//! End-to-end round-trip tests against a real filesystem layout.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use saker_schema::{xsd, Schema};
use saker_tables::{
    CampaignDatabase, ClassEntity, DamageType, Error, FeatureEntryData, ObjectiveClassData,
    ObjectiveEntry, ObjectiveTable, PointData, PointHeaderData, SchemaSource, Table, TableRecord,
    WeaponClassData,
};

/// Write the descriptor-derived schema file for a record type.
fn write_schema<R: TableRecord>(dir: &Path) {
    let schema = Schema::from_specs(R::DATASET, R::ROLE, R::COLUMNS);
    let text = xsd::to_string(&schema).unwrap();
    fs::write(dir.join(format!("{}.xsd", R::ROLE)), text).unwrap();
}

fn weapon_schemas() -> (TempDir, SchemaSource) {
    let dir = TempDir::new().unwrap();
    write_schema::<WeaponClassData>(dir.path());
    let source = SchemaSource::new(dir.path());
    (dir, source)
}

fn objective_schemas() -> (TempDir, SchemaSource) {
    let dir = TempDir::new().unwrap();
    write_schema::<ObjectiveClassData>(dir.path());
    write_schema::<FeatureEntryData>(dir.path());
    write_schema::<PointData>(dir.path());
    write_schema::<PointHeaderData>(dir.path());
    let source = SchemaSource::new(dir.path());
    (dir, source)
}

fn sample_weapons() -> Table<WeaponClassData> {
    let mut table = Table::new();
    for (num, name) in [(0u16, "GUN"), (1, "AIM-9"), (2, "MK-82")] {
        table.records_mut().push(WeaponClassData {
            num,
            name: name.to_string(),
            ..Default::default()
        });
    }
    {
        let aim9 = &mut table.records_mut()[1];
        aim9.strength = 500;
        aim9.damage_type = DamageType::HighExplosive.code();
        aim9.hit_chance = [0, 0, 0, 0, 60, 80, 0, 0];
    }
    table
}

#[test]
fn test_weapon_table_round_trip() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_WCD.xml");

    assert!(sample_weapons().save(&path, &schemas).unwrap());

    let table = Table::<WeaponClassData>::from_file(&path, &schemas).unwrap();
    assert!(!table.is_default_initialization());
    assert_eq!(table.len(), 3);

    let aim9 = &table.records()[1];
    assert_eq!(aim9.strength, 500);
    assert_eq!(aim9.damage_type, DamageType::HighExplosive.code());
    assert_eq!(aim9.name, "AIM-9");

    // The document carries the literal name text and the integer code.
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<Name>AIM-9</Name>"));
    assert!(text.contains(&format!(
        "<DamageType>{}</DamageType>",
        DamageType::HighExplosive.code()
    )));
}

#[test]
fn test_save_load_save_is_byte_identical() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let first = data_dir.path().join("FALCON4_WCD.xml");
    let second = data_dir.path().join("again.xml");

    sample_weapons().save(&first, &schemas).unwrap();
    let table = Table::<WeaponClassData>::from_file(&first, &schemas).unwrap();
    table.save(&second, &schemas).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_sparse_columns_round_trip_losslessly() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_WCD.xml");

    sample_weapons().save(&path, &schemas).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    // Exactly the two non-default hit-chance slots are present.
    assert!(text.contains("<HitChance_4>60</HitChance_4>"));
    assert!(text.contains("<HitChance_5>80</HitChance_5>"));
    assert!(!text.contains("HitChance_0"));
    assert!(!text.contains("HitChance_7"));

    let table = Table::<WeaponClassData>::from_file(&path, &schemas).unwrap();
    assert_eq!(table.records()[1].hit_chance, [0, 0, 0, 0, 60, 80, 0, 0]);
}

#[test]
fn test_missing_file_leaves_default_state() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();

    let table =
        Table::<WeaponClassData>::from_file(&data_dir.path().join("FALCON4_WCD.xml"), &schemas)
            .unwrap();
    assert!(table.is_default_initialization());
    assert!(table.is_empty());
}

#[test]
fn test_missing_schema_is_fatal() {
    let empty_schemas = TempDir::new().unwrap();
    let schemas = SchemaSource::new(empty_schemas.path());
    let data_dir = TempDir::new().unwrap();

    let err =
        Table::<WeaponClassData>::from_file(&data_dir.path().join("FALCON4_WCD.xml"), &schemas)
            .unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(saker_schema::Error::MissingSchema { .. })
    ));
}

#[test]
fn test_unknown_column_rejected() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_WCD.xml");

    sample_weapons().save(&path, &schemas).unwrap();
    let text = fs::read_to_string(&path)
        .unwrap()
        .replace("<Strength>500</Strength>", "<Strength>500</Strength><Bogus>1</Bogus>");
    fs::write(&path, text).unwrap();

    let err = Table::<WeaponClassData>::from_file(&path, &schemas).unwrap_err();
    assert!(matches!(
        err,
        Error::Dataset(saker_dataset::Error::UnknownColumn { .. })
    ));
}

#[test]
fn test_id_mismatch_rejected() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_WCD.xml");

    let mut table = sample_weapons();
    table.records_mut()[2].num = 9;
    table.save(&path, &schemas).unwrap();

    let err = Table::<WeaponClassData>::from_file(&path, &schemas).unwrap_err();
    assert!(matches!(err, Error::IdMismatch { index: 2, id: 9, .. }));
}

#[test]
fn test_empty_file_is_default_initialized() {
    let (_schema_dir, schemas) = weapon_schemas();
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_WCD.xml");
    fs::write(&path, "").unwrap();

    let mut table = Table::<WeaponClassData>::new();
    assert!(!table.load(&path, &schemas).unwrap());
    assert!(table.is_default_initialization());
}

#[test]
fn test_class_table_loads_without_schema_file() {
    let empty_schemas = TempDir::new().unwrap();
    let schemas = SchemaSource::new(empty_schemas.path());
    let data_dir = TempDir::new().unwrap();
    let path = data_dir.path().join("FALCON4_CT.xml");

    let mut table = Table::<ClassEntity>::new();
    table.records_mut().push(ClassEntity {
        num: 0,
        domain: 4,
        hit_points: 50,
        collidable: true,
        ..Default::default()
    });
    table.records_mut().push(ClassEntity { num: 1, ..Default::default() });
    table.save(&path, &schemas).unwrap();

    let back = Table::<ClassEntity>::from_file(&path, &schemas).unwrap();
    assert_eq!(back.records(), table.records());
}

fn sample_objectives() -> ObjectiveTable {
    let mut table = ObjectiveTable::new();
    for num in 0u16..2 {
        table.entries_mut().push(ObjectiveEntry {
            objective: ObjectiveClassData {
                num,
                ct_idx: 200 + num as i16,
                name: format!("Objective {num}"),
                ..Default::default()
            },
            features: vec![
                FeatureEntryData { num: 0, feature_ct_idx: 11, ..Default::default() },
                FeatureEntryData { num: 1, feature_ct_idx: 12, ..Default::default() },
            ],
            points: (0..10)
                .map(|i| PointData { num: i, x_offset: i as f32, ..Default::default() })
                .collect(),
            point_headers: vec![
                PointHeaderData { num: 0, point_count: 4, first_point: -7, ..Default::default() },
                PointHeaderData { num: 1, point_count: 3, first_point: -7, ..Default::default() },
                PointHeaderData { num: 2, point_count: 3, first_point: -7, ..Default::default() },
            ],
        });
    }
    table
}

#[test]
fn test_objective_directory_round_trip() {
    let (_schema_dir, schemas) = objective_schemas();
    let data_dir = TempDir::new().unwrap();
    let root = data_dir.path().join("FALCON4_OCD");

    assert!(sample_objectives().save(&root, &schemas).unwrap());

    // Zero-padded directory and file naming.
    for index in 0..2 {
        let subdir = root.join(format!("OCD_{index:05}"));
        assert!(subdir.is_dir());
        for role in ["OCD", "FED", "PDX", "PHD"] {
            assert!(subdir.join(format!("{role}_{index:05}.xml")).is_file());
        }
    }

    let mut table = ObjectiveTable::new();
    assert!(table.load(&root, &schemas).unwrap());
    assert_eq!(table.len(), 2);

    let entry = &table.entries()[0];
    assert_eq!(entry.features.len(), 2);
    assert_eq!(entry.points.len(), 10);

    // FirstPoint was recomputed as the running sum of PointCount.
    let firsts: Vec<i16> = entry.point_headers.iter().map(|h| h.first_point).collect();
    assert_eq!(firsts, [0, 4, 7]);
}

#[test]
fn test_objective_missing_role_file_aborts() {
    let (_schema_dir, schemas) = objective_schemas();
    let data_dir = TempDir::new().unwrap();
    let root = data_dir.path().join("FALCON4_OCD");

    sample_objectives().save(&root, &schemas).unwrap();
    fs::remove_file(root.join("OCD_00001").join("PHD_00001.xml")).unwrap();

    let mut table = ObjectiveTable::new();
    let err = table.load(&root, &schemas).unwrap_err();
    assert!(matches!(err, Error::RoleFile { role: "PHD", found: 0, .. }));
}

#[test]
fn test_database_discovery_and_round_trip() {
    let schema_dir = TempDir::new().unwrap();
    write_schema::<WeaponClassData>(schema_dir.path());
    write_schema::<ObjectiveClassData>(schema_dir.path());
    write_schema::<FeatureEntryData>(schema_dir.path());
    write_schema::<PointData>(schema_dir.path());
    write_schema::<PointHeaderData>(schema_dir.path());
    let schemas = SchemaSource::new(schema_dir.path());

    let data_dir = TempDir::new().unwrap();
    sample_weapons()
        .save(&data_dir.path().join("FALCON4_WCD.xml"), &schemas)
        .unwrap();
    sample_objectives()
        .save(&data_dir.path().join("FALCON4_OCD"), &schemas)
        .unwrap();
    // An unrelated file is ignored.
    fs::write(data_dir.path().join("notes.txt"), "not a table").unwrap();

    let db = CampaignDatabase::load(data_dir.path(), &schemas).unwrap();
    assert_eq!(db.weapons.len(), 3);
    assert_eq!(db.objectives.len(), 2);
    assert!(db.units.is_default_initialization());

    let out_dir = TempDir::new().unwrap();
    db.save(out_dir.path(), &schemas).unwrap();
    assert!(out_dir.path().join("FALCON4_WCD.xml").is_file());
    assert!(out_dir.path().join("FALCON4_OCD").join("OCD_00001").is_dir());
    // Default-initialized tables are not written.
    assert!(!out_dir.path().join("FALCON4_UCD.xml").exists());
}

#[test]
fn test_database_requires_at_least_one_file() {
    let schema_dir = TempDir::new().unwrap();
    let schemas = SchemaSource::new(schema_dir.path());
    let data_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("notes.txt"), "nothing here").unwrap();

    let err = CampaignDatabase::load(data_dir.path(), &schemas).unwrap_err();
    assert!(matches!(err, Error::NoDatabaseFiles { .. }));
}
