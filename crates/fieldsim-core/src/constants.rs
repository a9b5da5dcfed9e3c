//! Simulation constants and tuning parameters.

/// Simulated seconds represented by one tick at speed 1.0.
pub const STEP_DURATION_SECS: f64 = 1.0;

/// Wall-clock interval between automatic ticks (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Lower bound for the playback speed multiplier.
pub const MIN_SIMULATION_SPEED: f64 = 0.1;

/// Default playback speed multiplier.
pub const DEFAULT_SIMULATION_SPEED: f64 = 1.0;

// --- Geo ---

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// --- Units ---

/// Infantry speed (m/s).
pub const INFANTRY_SPEED: f64 = 2.0;

/// Armor speed (m/s).
pub const TANK_SPEED: f64 = 5.0;

/// Reconnaissance speed (m/s).
pub const RECON_SPEED: f64 = 10.0;

// --- Combat ---

/// Range within which opposing units engage (meters, haversine).
pub const ENGAGEMENT_RANGE_M: f64 = 150.0;

/// Probability that a single engagement destroys its target.
pub const DEFAULT_HIT_CHANCE: f64 = 0.5;

// --- History ---

/// Maximum number of roster snapshots retained for step-back.
pub const HISTORY_CAPACITY: usize = 1000;
