//! Per-unit systems run by the stepper.
//!
//! Systems are free functions over the roster. They do not own state.

pub mod engagement;
pub mod movement;
