//! Engine tuning parameters.

use std::time::Duration;

use fieldsim_core::constants::*;

use crate::error::{SimError, SimResult};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for combat draws. Same seed and same command sequence
    /// give the same outcomes.
    pub seed: u64,
    /// Probability that one engagement destroys its target.
    pub hit_chance: f64,
    /// Engagement range in meters.
    pub engagement_range_m: f64,
    /// Number of roster snapshots kept for step-back.
    pub history_capacity: usize,
    /// Simulated seconds per tick at speed 1.0.
    pub step_duration_secs: f64,
    /// Wall-clock time between automatic ticks while playing.
    pub tick_interval: Duration,
    /// Initial playback speed multiplier.
    pub initial_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hit_chance: DEFAULT_HIT_CHANCE,
            engagement_range_m: ENGAGEMENT_RANGE_M,
            history_capacity: HISTORY_CAPACITY,
            step_duration_secs: STEP_DURATION_SECS,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            initial_speed: DEFAULT_SIMULATION_SPEED,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        let invalid = |reason: String| Err(SimError::InvalidConfig { reason });

        if !(0.0..=1.0).contains(&self.hit_chance) {
            return invalid(format!("hit chance {} outside [0, 1]", self.hit_chance));
        }
        if !(self.engagement_range_m > 0.0) {
            return invalid(format!(
                "engagement range {} must be positive",
                self.engagement_range_m
            ));
        }
        if self.history_capacity == 0 {
            return invalid("history capacity must be at least 1".to_string());
        }
        if !(self.step_duration_secs > 0.0) {
            return invalid(format!(
                "step duration {} must be positive",
                self.step_duration_secs
            ));
        }
        if self.tick_interval.is_zero() {
            return invalid("tick interval must be non-zero".to_string());
        }
        if !self.initial_speed.is_finite() {
            return invalid(format!("initial speed {} is not finite", self.initial_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_hit_chance() {
        let config = SimConfig {
            hit_chance: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hit chance"), "{err}");
    }

    #[test]
    fn test_rejects_zero_history() {
        let config = SimConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = SimConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
