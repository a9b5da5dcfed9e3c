//! fieldsim process.
//!
//! Wires the simulation engine to a single-writer loop thread and a
//! JSON-lines transport on stdin/stdout.

pub mod cli;
pub mod game_loop;
pub mod ipc;
pub mod state;

pub use fieldsim_core as core;
