//! Record definitions for every flat campaign database table.
//!
//! One module per table role. Each record type carries its static column
//! descriptor and maps itself to and from the flat row form; sentinel
//! defaults for packed groups are explicit constants on the type.

mod aircraft;
mod class_entity;
mod damage;
mod feature;
mod ir_sensor;
mod radar;
mod radar_warning;
mod rocket;
mod sim_weapon;
mod squadron_stores;
mod unit;
mod vehicle;
mod visual_sensor;
mod weapon;
mod weapon_list;

pub use aircraft::{AircraftData, SENSOR_SLOTS};
pub use class_entity::ClassEntity;
pub use damage::DamageData;
pub use feature::FeatureClassData;
pub use ir_sensor::IrSensorData;
pub use radar::RadarData;
pub use radar_warning::RadarWarningData;
pub use rocket::{RocketData, POD_SLOTS};
pub use sim_weapon::SimWeaponData;
pub use squadron_stores::{SquadronStoresData, LEGACY_STORES, STORES};
pub use unit::{UnitClassData, ELEMENT_SLOTS};
pub use vehicle::{VehicleClassData, HARDPOINTS};
pub use visual_sensor::VisualSensorData;
pub use weapon::WeaponClassData;
pub use weapon_list::{WeaponListData, RACK_SLOTS};
