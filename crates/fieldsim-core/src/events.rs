//! Events emitted by the simulation for observers.
//!
//! Event names are the contract with the broadcaster; how they are
//! delivered is up to the transport.

use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// Everything the engine tells its observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum SimEvent {
    /// A roster member, sent to a newly attached observer.
    EntityCreated(Entity),
    /// Position, heading or active flag changed.
    EntityUpdated(Entity),
    /// Unit went inactive through combat.
    EntityDestroyed(Entity),
    /// Elapsed simulated seconds after a tick that did not finish the run.
    TimeUpdate(f64),
    /// Narration for the operator.
    Log(LogEntry),
}

/// Human-readable narration tagged with the simulated time it happened at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub msg: String,
    pub time: f64,
}

impl SimEvent {
    pub fn log(msg: impl Into<String>, time: f64) -> Self {
        Self::Log(LogEntry {
            msg: msg.into(),
            time,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EntityCreated(_) => "entityCreated",
            Self::EntityUpdated(_) => "entityUpdated",
            Self::EntityDestroyed(_) => "entityDestroyed",
            Self::TimeUpdate(_) => "timeUpdate",
            Self::Log(_) => "log",
        }
    }

    /// The narration text, if this is a log event.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Log(entry) => Some(&entry.msg),
            _ => None,
        }
    }
}

/// Receiver of engine events, implemented by the broadcaster.
pub trait EventSink {
    fn publish(&mut self, event: SimEvent);

    fn publish_all(&mut self, events: impl IntoIterator<Item = SimEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.publish(event);
        }
    }
}

impl EventSink for Vec<SimEvent> {
    fn publish(&mut self, event: SimEvent) {
        self.push(event);
    }
}
