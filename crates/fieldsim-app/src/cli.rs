//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use fieldsim_sim::config::SimConfig;

#[derive(Debug, Parser)]
#[command(
    name = "fieldsim",
    version,
    about = "Tactical unit simulation: JSON commands on stdin, JSON events on stdout"
)]
pub struct Args {
    /// Seed for combat draws
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability that an engagement destroys its target
    #[arg(long, default_value_t = fieldsim_core::constants::DEFAULT_HIT_CHANCE)]
    pub hit_chance: f64,

    /// Wall-clock milliseconds between automatic ticks
    #[arg(long, default_value_t = fieldsim_core::constants::TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Initial playback speed multiplier
    #[arg(long, default_value_t = fieldsim_core::constants::DEFAULT_SIMULATION_SPEED)]
    pub speed: f64,

    /// Scenario file (JSON). Defaults to the built-in skirmish
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Do not send the roster to stdout on startup
    #[arg(long)]
    pub no_initial_sync: bool,
}

impl Args {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            hit_chance: self.hit_chance,
            tick_interval: Duration::from_millis(self.tick_ms),
            initial_speed: self.speed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["fieldsim"]);
        let config = args.sim_config();
        assert_eq!(config.seed, 42);
        assert_eq!(config.hit_chance, 0.5);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert!(args.scenario.is_none());
        assert!(!args.no_initial_sync);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "fieldsim",
            "--seed",
            "7",
            "--hit-chance",
            "0.9",
            "--tick-ms",
            "250",
            "--speed",
            "2",
            "--scenario",
            "drill.json",
            "--no-initial-sync",
        ]);
        let config = args.sim_config();
        assert_eq!(config.seed, 7);
        assert_eq!(config.hit_chance, 0.9);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.initial_speed, 2.0);
        assert_eq!(args.scenario, Some(PathBuf::from("drill.json")));
        assert!(args.no_initial_sync);
    }
}
