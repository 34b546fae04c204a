//! Saker CLI - Command-line tool for Falcon 4 campaign database files.
//!
//! This is the main entry point for the Saker command-line application.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use saker::prelude::*;
use saker::tables::{
    AircraftData, ClassEntity, DamageData, FeatureClassData, FeatureEntryData, IrSensorData,
    ObjectiveClassData, PointData, PointHeaderData, RadarData, RadarWarningData, RocketData,
    SimWeaponData, SquadronStoresData, UnitClassData, VehicleClassData, VisualSensorData,
    WeaponClassData, WeaponListData,
};

/// Saker - Falcon 4 campaign database tool
#[derive(Parser)]
#[command(name = "saker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a database directory and report per-table record counts
    Check {
        /// Database directory (the one holding the FALCON4_* files)
        #[arg(short, long, env = "SAKER_DB")]
        database: PathBuf,

        /// Schema directory (one .xsd per table role)
        #[arg(short, long, env = "SAKER_SCHEMAS")]
        schemas: PathBuf,
    },

    /// Load a database directory and rewrite it in full elsewhere
    Rewrite {
        /// Database directory
        #[arg(short, long, env = "SAKER_DB")]
        database: PathBuf,

        /// Schema directory
        #[arg(short, long, env = "SAKER_SCHEMAS")]
        schemas: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Emit the XSD a table role's record descriptor implies
    Schema {
        /// Table role tag (WCD, UCD, OCD, ...)
        #[arg(short, long)]
        role: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { database, schemas } => {
            cmd_check(&database, &schemas)?;
        }
        Commands::Rewrite { database, schemas, output } => {
            cmd_rewrite(&database, &schemas, &output)?;
        }
        Commands::Schema { role, output } => {
            cmd_schema(&role, output.as_deref())?;
        }
    }

    Ok(())
}

fn cmd_check(database: &std::path::Path, schemas: &std::path::Path) -> Result<()> {
    let start = Instant::now();
    let source = SchemaSource::new(schemas);
    let db = CampaignDatabase::load(database, &source)
        .with_context(|| format!("loading database from {}", database.display()))?;

    println!("Database: {}", database.display());
    print_count("class entities (CT)", db.classes.len(), db.classes.is_default_initialization());
    print_count("damage data (DDP)", db.damage.len(), db.damage.is_default_initialization());
    print_count("aircraft (ACD)", db.aircraft.len(), db.aircraft.is_default_initialization());
    print_count("feature classes (FCD)", db.features.len(), db.features.is_default_initialization());
    print_count("IR sensors (ICD)", db.ir_sensors.len(), db.ir_sensors.is_default_initialization());
    print_count("radars (RCD)", db.radars.len(), db.radars.is_default_initialization());
    print_count("radar warning receivers (RWD)", db.radar_warnings.len(), db.radar_warnings.is_default_initialization());
    print_count("rocket pods (RKT)", db.rockets.len(), db.rockets.is_default_initialization());
    print_count("squadron stores (SSD)", db.squadron_stores.len(), db.squadron_stores.is_default_initialization());
    print_count("sim weapons (SWD)", db.sim_weapons.len(), db.sim_weapons.is_default_initialization());
    print_count("unit classes (UCD)", db.units.len(), db.units.is_default_initialization());
    print_count("vehicle classes (VCD)", db.vehicles.len(), db.vehicles.is_default_initialization());
    print_count("visual sensors (VSD)", db.visual_sensors.len(), db.visual_sensors.is_default_initialization());
    print_count("weapon classes (WCD)", db.weapons.len(), db.weapons.is_default_initialization());
    print_count("weapon lists (WLD)", db.weapon_lists.len(), db.weapon_lists.is_default_initialization());
    print_count("objectives (OCD)", db.objectives.len(), db.objectives.is_default_initialization());

    println!("Loaded in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn print_count(label: &str, count: usize, default_init: bool) {
    if default_init {
        println!("  {label:<32} (not present)");
    } else {
        println!("  {label:<32} {count}");
    }
}

fn cmd_rewrite(
    database: &std::path::Path,
    schemas: &std::path::Path,
    output: &std::path::Path,
) -> Result<()> {
    let start = Instant::now();
    let source = SchemaSource::new(schemas);

    let progress = ProgressBar::new(2);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    progress.set_message("loading");
    let db = CampaignDatabase::load(database, &source)
        .with_context(|| format!("loading database from {}", database.display()))?;
    progress.inc(1);

    progress.set_message("saving");
    db.save(output, &source)
        .with_context(|| format!("saving database to {}", output.display()))?;
    progress.inc(1);

    progress.finish_with_message("done");
    println!(
        "Rewrote {} -> {} in {:.2}s",
        database.display(),
        output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn cmd_schema(role: &str, output: Option<&std::path::Path>) -> Result<()> {
    let schema = descriptor_schema(role)
        .with_context(|| format!("unknown table role {role:?}"))?;
    let text = saker::schema::xsd::to_string(&schema)?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Build the descriptor-derived schema for a role tag.
fn descriptor_schema(role: &str) -> Result<Schema> {
    fn of<R: TableRecord>() -> Schema {
        Schema::from_specs(R::DATASET, R::ROLE, R::COLUMNS)
    }

    Ok(match role {
        "CT" => of::<ClassEntity>(),
        "DDP" => of::<DamageData>(),
        "ACD" => of::<AircraftData>(),
        "FCD" => of::<FeatureClassData>(),
        "ICD" => of::<IrSensorData>(),
        "RCD" => of::<RadarData>(),
        "RWD" => of::<RadarWarningData>(),
        "RKT" => of::<RocketData>(),
        "SSD" => of::<SquadronStoresData>(),
        "SWD" => of::<SimWeaponData>(),
        "UCD" => of::<UnitClassData>(),
        "VCD" => of::<VehicleClassData>(),
        "VSD" => of::<VisualSensorData>(),
        "WCD" => of::<WeaponClassData>(),
        "WLD" => of::<WeaponListData>(),
        "OCD" => of::<ObjectiveClassData>(),
        "FED" => of::<FeatureEntryData>(),
        "PDX" => of::<PointData>(),
        "PHD" => of::<PointHeaderData>(),
        other => bail!("no table role matches {other:?}"),
    })
}
