//! Fundamental geographic and simulation types.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::{Side, UnitType};
use crate::geo;

/// Geographic coordinate in degrees. Values are not range-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geo::distance(self, other)
    }

    /// Initial bearing toward another coordinate in degrees [0, 360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        geo::bearing(self, other)
    }

    /// Planar interpolation toward `other` by `fraction` of the lat/lon delta.
    pub fn lerp_toward(&self, other: &Coordinate, fraction: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * fraction,
            lon: self.lon + (other.lon - self.lon) * fraction,
        }
    }
}

/// Simulation clock. The step counter and the elapsed time are tracked
/// independently because elapsed time is scaled by playback speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks taken (decremented on step-back).
    pub step_id: u64,
    /// Elapsed simulated seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick covering `secs` of simulated time.
    pub fn advance(&mut self, secs: f64) {
        self.step_id += 1;
        self.elapsed_secs += secs;
    }

    /// Undo one tick: both counters drop by one unit, floored at zero.
    pub fn rewind(&mut self) {
        self.step_id = self.step_id.saturating_sub(1);
        self.elapsed_secs = (self.elapsed_secs - 1.0).max(0.0);
    }

    /// `hh:mm:ss` rendering of the elapsed time.
    pub fn clock(&self) -> String {
        let total = self.elapsed_secs.max(0.0).floor() as u64;
        format!(
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

/// One simulated unit.
///
/// `callsign` is the sole lookup key and is unique across the roster.
/// Cloning an entity copies its path queues, so a cloned roster is fully
/// independent of later mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub callsign: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub side: Side,
    pub lat: f64,
    pub lon: f64,
    /// Remaining waypoints, consumed from the front.
    pub path: VecDeque<Coordinate>,
    /// Meters per simulated second, fixed by `unit_type`.
    pub speed: f64,
    /// Degrees [0, 360). Meaningless once inactive.
    pub heading: f64,
    pub active: bool,
    /// Path as of creation or the last route update; restored on reset.
    pub original_path: Vec<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
}

impl Entity {
    pub fn new(
        callsign: impl Into<String>,
        unit_type: UnitType,
        side: Side,
        position: Coordinate,
        path: Vec<Coordinate>,
    ) -> Self {
        Self {
            callsign: callsign.into(),
            unit_type,
            side,
            lat: position.lat,
            lon: position.lon,
            path: path.iter().copied().collect(),
            speed: unit_type.speed(),
            heading: 0.0,
            active: true,
            original_path: path,
            ammo: None,
            health: None,
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    pub fn set_position(&mut self, position: Coordinate) {
        self.lat = position.lat;
        self.lon = position.lon;
    }

    /// Replace both the live and the original path and reactivate the unit.
    pub fn assign_route(&mut self, path: &[Coordinate]) {
        self.path = path.iter().copied().collect();
        self.original_path = path.to_vec();
        self.active = true;
    }

    /// Return to the start of the original path.
    ///
    /// A unit with an empty original path keeps its current position.
    pub fn restore(&mut self) {
        if let Some(start) = self.original_path.first().copied() {
            self.set_position(start);
        }
        self.path = self.original_path.iter().copied().collect();
        self.active = true;
        self.heading = 0.0;
    }

    /// True if this unit may engage `other`: opposite side and still active.
    pub fn can_target(&self, other: &Entity) -> bool {
        self.side.opposes(other.side) && other.active
    }
}
