//! Operator commands sent to the simulation.
//!
//! Commands are applied one at a time by the single thread that owns the
//! engine, never in the middle of a tick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coordinate;

/// All operator actions accepted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimCommand {
    /// Playback control. The action stays a string on the wire so that an
    /// unrecognised action can be reported by name.
    Control { action: String },
    /// Set the playback speed multiplier (clamped to at least 0.1).
    SetSpeed { factor: f64 },
    /// Return every unit to the start of its original path.
    Reset,
    /// Give a unit a new route, reactivating it.
    UpdateRoute {
        callsign: String,
        path: Vec<Coordinate>,
    },
    /// Report the distance between two units.
    Measure { from: String, to: String },
}

impl SimCommand {
    pub fn control(action: ControlAction) -> Self {
        Self::Control {
            action: action.to_string(),
        }
    }
}

/// Playback control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Play,
    Pause,
    Stop,
    Step,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ControlAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "stop" => Ok(Self::Stop),
            "step" => Ok(Self::Step),
            "reverse" => Ok(Self::Reverse),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Step => "step",
            Self::Reverse => "reverse",
        };
        f.write_str(name)
    }
}
