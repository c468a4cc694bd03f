//! Fixed table of weapon codes printed in frag lines.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Broad weapon family, used to pick a display icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    Vehicle,
    Gun,
    Grenade,
    Rocket,
    Machete,
    Boat,
}

impl WeaponCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Gun => "gun",
            Self::Grenade => "grenade",
            Self::Rocket => "rocket",
            Self::Machete => "machete",
            Self::Boat => "boat",
        }
    }

    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Vehicle => "🚙",
            Self::Gun => "🔫",
            Self::Grenade => "💣",
            Self::Rocket => "🚀",
            Self::Machete => "🔪",
            Self::Boat => "🚤",
        }
    }
}

impl fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known weapon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Weapon {
    pub code: &'static str,
    pub category: WeaponCategory,
}

const fn weapon(code: &'static str, category: WeaponCategory) -> Weapon {
    Weapon { code, category }
}

/// Every weapon code the server writes.
pub const WEAPONS: &[Weapon] = &[
    weapon("Vehicle", WeaponCategory::Vehicle),
    weapon("Falcon", WeaponCategory::Gun),
    weapon("Shotgun", WeaponCategory::Gun),
    weapon("P90", WeaponCategory::Gun),
    weapon("MP5", WeaponCategory::Gun),
    weapon("M4", WeaponCategory::Gun),
    weapon("AG36", WeaponCategory::Gun),
    weapon("OICW", WeaponCategory::Gun),
    weapon("SniperRifle", WeaponCategory::Gun),
    weapon("M249", WeaponCategory::Gun),
    weapon("MG", WeaponCategory::Gun),
    weapon("VehicleMountedAutoMG", WeaponCategory::Gun),
    weapon("VehicleMountedMG", WeaponCategory::Gun),
    weapon("HandGrenade", WeaponCategory::Grenade),
    weapon("AG36Grenade", WeaponCategory::Grenade),
    weapon("OICWGrenade", WeaponCategory::Grenade),
    weapon("StickyExplosive", WeaponCategory::Grenade),
    weapon("Rocket", WeaponCategory::Rocket),
    weapon("VehicleMountedRocketMG", WeaponCategory::Rocket),
    weapon("VehicleRocket", WeaponCategory::Rocket),
    weapon("Machete", WeaponCategory::Machete),
    weapon("Boat", WeaponCategory::Boat),
];

impl Weapon {
    /// Looks up a code in [`WEAPONS`]. Codes are case-sensitive.
    pub fn lookup(code: &str) -> Result<Self, UnrecognizedWeaponCode> {
        WEAPONS
            .iter()
            .find(|weapon| weapon.code == code)
            .copied()
            .ok_or_else(|| UnrecognizedWeaponCode(code.to_string()))
    }

    pub const fn icon(&self) -> &'static str {
        self.category.icon()
    }
}

impl std::str::FromStr for Weapon {
    type Err = UnrecognizedWeaponCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// A weapon code missing from [`WEAPONS`]. Never fatal: display just drops
/// the icon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized weapon code: {0}")]
pub struct UnrecognizedWeaponCode(pub String);
