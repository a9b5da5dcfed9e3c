//! Simulation engine for fieldsim.
//!
//! Owns the unit roster, advances it one tick at a time, resolves combat,
//! and supports bounded step-back through roster snapshots.

pub mod cadence;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod scenario;
pub mod systems;

pub use engine::SimulationEngine;
pub use fieldsim_core as core;
