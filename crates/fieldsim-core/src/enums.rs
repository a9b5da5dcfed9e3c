//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{INFANTRY_SPEED, RECON_SPEED, TANK_SPEED};

/// Unit category. Fixed for the lifetime of a unit and determines its speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Infantry,
    #[serde(alias = "armour", alias = "armor")]
    Tank,
    Recon,
}

impl UnitType {
    /// Movement speed in meters per simulated second.
    pub fn speed(&self) -> f64 {
        match self {
            Self::Infantry => INFANTRY_SPEED,
            Self::Tank => TANK_SPEED,
            Self::Recon => RECON_SPEED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Infantry => "infantry",
            Self::Tank => "tank",
            Self::Recon => "recon",
        }
    }
}

/// Allegiance. Only units on opposing sides engage each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub fn opposes(&self, other: Side) -> bool {
        *self != other
    }
}
