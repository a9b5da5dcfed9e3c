//! Scenario definitions: the initial roster and its waypoint paths.
//!
//! A scenario is either the built-in default (a skirmish near 49.63 N,
//! 17.52 E) or a JSON document loaded from disk.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fieldsim_core::enums::{Side, UnitType};
use fieldsim_core::types::{Coordinate, Entity};

use crate::error::{SimError, SimResult};

/// One unit as described in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub callsign: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub side: Side,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub path: Vec<Coordinate>,
    #[serde(default)]
    pub ammo: Option<u32>,
    #[serde(default)]
    pub health: Option<u32>,
}

impl UnitSpec {
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::new(
            self.callsign.clone(),
            self.unit_type,
            self.side,
            Coordinate::new(self.lat, self.lon),
            self.path.clone(),
        );
        entity.ammo = self.ammo;
        entity.health = self.health;
        entity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub units: Vec<UnitSpec>,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let scenario = Self::from_json(&text)?;
        log::info!(
            "loaded scenario {} ({} units)",
            path.as_ref().display(),
            scenario.units.len()
        );
        Ok(scenario)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Callsigns must be non-empty and unique.
    pub fn validate(&self) -> SimResult<()> {
        let mut seen = HashSet::new();
        for unit in &self.units {
            if unit.callsign.is_empty() {
                return Err(SimError::InvalidScenario {
                    reason: "unit with empty callsign".to_string(),
                });
            }
            if !seen.insert(unit.callsign.as_str()) {
                return Err(SimError::DuplicateCallsign {
                    callsign: unit.callsign.clone(),
                });
            }
        }
        Ok(())
    }

    /// The roster in scenario order.
    pub fn entities(&self) -> Vec<Entity> {
        self.units.iter().map(UnitSpec::to_entity).collect()
    }

    /// Built-in skirmish: five allied and three enemy units closing on
    /// each other.
    pub fn default_skirmish() -> Self {
        let alpha = route(&[
            (49.634, 17.522),
            (49.6355, 17.5245),
            (49.6368, 17.5268),
            (49.6380, 17.5290),
        ]);
        let bravo = route(&[
            (49.636, 17.528),
            (49.6372, 17.5286),
            (49.6385, 17.5291),
            (49.6398, 17.5284),
        ]);
        let charlie = route(&[
            (49.632, 17.525),
            (49.6334, 17.5262),
            (49.6349, 17.5273),
            (49.6362, 17.5288),
        ]);
        let delta = route(&[
            (49.630, 17.526),
            (49.6318, 17.5281),
            (49.6341, 17.5296),
            (49.6367, 17.5302),
            (49.6392, 17.5297),
        ]);
        let enemy1 = route(&[
            (49.638, 17.530),
            (49.6369, 17.5283),
            (49.6354, 17.5261),
            (49.6340, 17.5240),
        ]);
        let enemy2 = route(&[
            (49.639, 17.529),
            (49.6378, 17.5276),
            (49.6361, 17.5262),
            (49.6345, 17.5251),
        ]);
        let enemy3 = route(&[
            (49.640, 17.528),
            (49.6386, 17.5259),
            (49.6367, 17.5241),
            (49.6339, 17.5229),
        ]);

        Self {
            units: vec![
                spec("Alpha1", UnitType::Infantry, Side::Ally, (49.634, 17.522), &alpha),
                spec("Bravo2", UnitType::Tank, Side::Ally, (49.636, 17.528), &bravo),
                spec("Charlie3", UnitType::Infantry, Side::Ally, (49.632, 17.525), &charlie),
                spec("Delta4", UnitType::Recon, Side::Ally, (49.630, 17.526), &delta),
                spec("Echo5", UnitType::Recon, Side::Ally, (49.633, 17.524), &alpha),
                spec("Xray1", UnitType::Infantry, Side::Enemy, (49.638, 17.530), &enemy1),
                spec("Zulu2", UnitType::Tank, Side::Enemy, (49.639, 17.529), &enemy2),
                spec("Yankee3", UnitType::Recon, Side::Enemy, (49.640, 17.528), &enemy3),
            ],
        }
    }
}

fn route(points: &[(f64, f64)]) -> Vec<Coordinate> {
    points
        .iter()
        .map(|&(lat, lon)| Coordinate::new(lat, lon))
        .collect()
}

fn spec(
    callsign: &str,
    unit_type: UnitType,
    side: Side,
    (lat, lon): (f64, f64),
    path: &[Coordinate],
) -> UnitSpec {
    UnitSpec {
        callsign: callsign.to_string(),
        unit_type,
        side,
        lat,
        lon,
        path: path.to_vec(),
        ammo: None,
        health: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skirmish_roster() {
        let scenario = Scenario::default_skirmish();
        assert!(scenario.validate().is_ok());

        let roster = scenario.entities();
        assert_eq!(roster.len(), 8);
        assert_eq!(roster.iter().filter(|e| e.side == Side::Ally).count(), 5);
        assert_eq!(roster.iter().filter(|e| e.side == Side::Enemy).count(), 3);
        assert!(roster.iter().all(|e| e.active && !e.path.is_empty()));
        assert_eq!(roster[1].speed, 5.0, "Bravo2 is a tank");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "units": [
                {"callsign": "A", "type": "armour", "side": "ally", "lat": 1.0, "lon": 2.0,
                 "path": [{"lat": 1.1, "lon": 2.1}], "health": 80},
                {"callsign": "B", "type": "recon", "side": "enemy", "lat": 3.0, "lon": 4.0}
            ]
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        let roster = scenario.entities();
        assert_eq!(roster[0].unit_type, UnitType::Tank);
        assert_eq!(roster[0].health, Some(80));
        assert_eq!(roster[0].original_path, vec![Coordinate::new(1.1, 2.1)]);
        assert!(roster[1].path.is_empty());
    }

    #[test]
    fn test_duplicate_callsign_rejected() {
        let json = r#"{"units": [
            {"callsign": "A", "type": "tank", "side": "ally", "lat": 0, "lon": 0},
            {"callsign": "A", "type": "tank", "side": "enemy", "lat": 0, "lon": 0}
        ]}"#;
        let err = Scenario::from_json(json).unwrap_err();
        assert!(matches!(err, SimError::DuplicateCallsign { ref callsign } if callsign == "A"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Scenario::from_json("{\"units\": [{}]}").unwrap_err();
        assert!(matches!(err, SimError::Serialization(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
