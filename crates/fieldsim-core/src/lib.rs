//! Core types and definitions for the fieldsim tactical simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates and units, commands, events, constants, and geo math.
//! It has no dependency on any runtime or transport.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geo;
pub mod types;
