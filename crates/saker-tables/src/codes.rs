//! Domain code vocabularies consumed by the record tables.
//!
//! These are plain lookup vocabularies: integer codes stored in table
//! columns, named here so callers and tests can speak in terms of
//! `DamageType::HighExplosive` instead of bare integers.

/// Damage type codes stored in the weapon table's `DamageType` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DamageType {
    /// No damage.
    None = 0,
    /// Armor-penetrating.
    Penetration = 1,
    /// High explosive.
    HighExplosive = 2,
    /// Heave/blast displacement.
    Heave = 3,
    /// Incendiary.
    Incendiary = 4,
    /// Proximity-fused.
    Proximity = 5,
    /// Kinetic impact.
    Kinetic = 6,
    /// Hydrostatic (sub-surface).
    Hydrostatic = 7,
    /// Chemical.
    Chemical = 8,
    /// Nuclear.
    Nuclear = 9,
    /// Anything else.
    Other = 10,
}

impl DamageType {
    /// Parse from the stored integer code.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Penetration),
            2 => Some(Self::HighExplosive),
            3 => Some(Self::Heave),
            4 => Some(Self::Incendiary),
            5 => Some(Self::Proximity),
            6 => Some(Self::Kinetic),
            7 => Some(Self::Hydrostatic),
            8 => Some(Self::Chemical),
            9 => Some(Self::Nuclear),
            10 => Some(Self::Other),
            _ => None,
        }
    }

    /// The stored integer code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Movement type codes indexing the 8-slot hit-chance, detection and
/// damage-modifier groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MovementType {
    /// Stationary.
    NoMovement = 0,
    /// Infantry.
    Foot = 1,
    /// Wheeled vehicles.
    Wheeled = 2,
    /// Tracked vehicles.
    Tracked = 3,
    /// Low-altitude air.
    LowAir = 4,
    /// Air.
    Air = 5,
    /// Naval.
    Naval = 6,
    /// Rail.
    Rail = 7,
}

/// Number of movement types; the fixed bound of the per-movement-type
/// column groups.
pub const MOVEMENT_TYPES: usize = 8;

impl MovementType {
    /// Parse from the stored integer code.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoMovement),
            1 => Some(Self::Foot),
            2 => Some(Self::Wheeled),
            3 => Some(Self::Tracked),
            4 => Some(Self::LowAir),
            5 => Some(Self::Air),
            6 => Some(Self::Naval),
            7 => Some(Self::Rail),
            _ => None,
        }
    }

    /// Slot index into a per-movement-type column group.
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_type_codes_round_trip() {
        for code in 0..=10 {
            let ty = DamageType::from_i32(code).unwrap();
            assert_eq!(ty.code(), code);
        }
        assert_eq!(DamageType::from_i32(11), None);
    }

    #[test]
    fn test_movement_type_slots() {
        assert_eq!(MovementType::Air.slot(), 5);
        assert_eq!(MovementType::from_u8(7), Some(MovementType::Rail));
        assert_eq!(MovementType::from_u8(8), None);
    }
}
