//! Simulation engine: the authoritative state, the stepper, and the
//! command dispatcher.
//!
//! `SimulationEngine` owns the roster, the clock, the snapshot history and
//! the combat log. Nothing outside the engine mutates them. It is
//! completely headless and never blocks: the cadence driver only reports
//! when the next automatic tick is due, and the owning loop decides when
//! to call back in.
//!
//! Every public operation returns the events it produced, in order.

use std::time::{Duration, Instant};

use fieldsim_core::commands::{ControlAction, SimCommand};
use fieldsim_core::constants::MIN_SIMULATION_SPEED;
use fieldsim_core::events::SimEvent;
use fieldsim_core::types::{Coordinate, Entity, SimTime};

use crate::cadence::Cadence;
use crate::combat::CombatLog;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::history::SnapshotHistory;
use crate::scenario::Scenario;
use crate::systems::engagement;
use crate::systems::movement::{self, Movement};

/// The simulation engine. Owns the roster and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    /// Live roster in creation order.
    entities: Vec<Entity>,
    history: SnapshotHistory,
    time: SimTime,
    speed: f64,
    cadence: Cadence,
    combat: CombatLog,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine with an empty roster.
    pub fn new(config: SimConfig) -> Self {
        Self {
            history: SnapshotHistory::new(config.history_capacity),
            time: SimTime::default(),
            speed: config.initial_speed.max(MIN_SIMULATION_SPEED),
            cadence: Cadence::new(config.tick_interval),
            combat: CombatLog::new(config.hit_chance, config.seed),
            entities: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Create an engine seeded with a scenario's roster.
    pub fn with_scenario(config: SimConfig, scenario: &Scenario) -> SimResult<Self> {
        config.validate()?;
        scenario.validate()?;
        let mut engine = Self::new(config);
        for entity in scenario.entities() {
            engine.add_entity(entity)?;
        }
        Ok(engine)
    }

    /// Append a unit to the roster. Callsigns must be unique.
    pub fn add_entity(&mut self, entity: Entity) -> SimResult<()> {
        if self.entity(&entity.callsign).is_some() {
            return Err(SimError::DuplicateCallsign {
                callsign: entity.callsign,
            });
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Apply one operator command.
    pub fn execute(&mut self, command: SimCommand) -> Vec<SimEvent> {
        self.execute_at(command, Instant::now())
    }

    /// Apply one operator command, using `now` to anchor a started cadence.
    pub fn execute_at(&mut self, command: SimCommand, now: Instant) -> Vec<SimEvent> {
        match command {
            SimCommand::Control { action } => match action.parse::<ControlAction>() {
                Ok(action) => self.control(action, now),
                Err(unknown) => {
                    log::warn!("rejected control action '{}'", unknown.0);
                    self.narrate(unknown.to_string());
                }
            },
            SimCommand::SetSpeed { factor } => self.set_speed(factor),
            SimCommand::Reset => self.reset(),
            SimCommand::UpdateRoute { callsign, path } => self.update_route(&callsign, &path),
            SimCommand::Measure { from, to } => self.measure(&from, &to),
        }
        self.take_events()
    }

    /// Advance exactly one tick regardless of run mode.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        self.run_tick();
        self.take_events()
    }

    /// Restore the roster to the state before the most recent tick.
    pub fn step_back(&mut self) -> Vec<SimEvent> {
        self.rollback_one();
        self.take_events()
    }

    /// Run the automatic tick if the cadence says one is due at `now`.
    pub fn poll_cadence(&mut self, now: Instant) -> Vec<SimEvent> {
        if self.cadence.take_due(now) {
            self.run_tick();
        }
        self.take_events()
    }

    /// How long the owning loop may wait before the next automatic tick.
    /// `None` while stopped.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.cadence.time_until_due(now)
    }

    /// Events that bring a newly attached observer up to date.
    pub fn observer_snapshot(&self) -> Vec<SimEvent> {
        self.entities
            .iter()
            .cloned()
            .map(SimEvent::EntityCreated)
            .chain(std::iter::once(SimEvent::TimeUpdate(self.time.elapsed_secs)))
            .collect()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, callsign: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.callsign == callsign)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Elapsed simulated seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.time.elapsed_secs
    }

    pub fn step_id(&self) -> u64 {
        self.time.step_id
    }

    /// Playback speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether the cadence driver is issuing automatic ticks.
    pub fn is_running(&self) -> bool {
        self.cadence.is_running()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn combat_log(&self) -> &CombatLog {
        &self.combat
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|e| e.active).count()
    }

    fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn narrate(&mut self, msg: impl Into<String>) {
        self.events
            .push(SimEvent::log(msg, self.time.elapsed_secs));
    }

    fn control(&mut self, action: ControlAction, now: Instant) {
        match action {
            ControlAction::Play => {
                if self.cadence.start(now) {
                    log::info!("playback started at t={:.2}", self.time.elapsed_secs);
                    self.narrate("Simulation started");
                }
            }
            ControlAction::Pause => {
                if self.cadence.stop() {
                    log::info!("playback paused at t={:.2}", self.time.elapsed_secs);
                    self.narrate("Simulation paused");
                }
            }
            // Same effect as pause.
            ControlAction::Stop => {
                if self.cadence.stop() {
                    log::info!("playback stopped at t={:.2}", self.time.elapsed_secs);
                    self.narrate("Simulation stopped");
                }
            }
            ControlAction::Step => {
                self.run_tick();
                self.narrate("Simulation step");
            }
            ControlAction::Reverse => self.rollback_one(),
        }
    }

    fn run_tick(&mut self) {
        // Snapshot before any mutation so step-back restores pre-tick state.
        self.history.push(&self.entities);

        let step = self.config.step_duration_secs;
        self.time.advance(step * self.speed);
        let now = self.time.elapsed_secs;

        for i in 0..self.entities.len() {
            if !self.entities[i].active {
                continue;
            }

            let entity = &mut self.entities[i];
            let budget = movement::budget(entity.speed, step, self.speed);
            if movement::advance(entity, budget) == Movement::PathExhausted {
                entity.active = false;
                let msg = format!("Unit {} completed its path", entity.callsign);
                self.narrate(msg);
                continue;
            }
            self.events
                .push(SimEvent::EntityUpdated(self.entities[i].clone()));

            engagement::run(
                &mut self.entities,
                i,
                self.config.engagement_range_m,
                now,
                &mut self.combat,
                &mut self.events,
            );
        }

        let active = self.active_count();
        log::debug!(
            "tick {} t={:.2} ({}) active={active}",
            self.time.step_id,
            now,
            self.time.clock()
        );

        if active == 0 && self.cadence.stop() {
            log::info!("all units inactive at t={now:.2}, playback stopped");
            self.narrate("Simulation finished: all units completed their paths.");
        } else {
            self.events.push(SimEvent::TimeUpdate(now));
        }
    }

    fn rollback_one(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            self.narrate("No previous state to step back to.");
            return;
        };

        self.entities = snapshot;
        self.time.rewind();
        self.combat.rollback(self.time.elapsed_secs);
        self.events
            .extend(self.entities.iter().cloned().map(SimEvent::EntityUpdated));
        log::debug!("stepped back to tick {}", self.time.step_id);
        self.narrate("Stepped back in time.");
    }

    fn set_speed(&mut self, factor: f64) {
        self.speed = factor.max(MIN_SIMULATION_SPEED);
        log::info!("playback speed {}", self.speed);
        self.narrate(format!("Simulation speed set to {}×", self.speed));
    }

    fn reset(&mut self) {
        self.cadence.stop();
        self.history.clear();
        self.combat.clear();
        self.time = SimTime::default();

        for entity in &mut self.entities {
            entity.restore();
        }
        self.events
            .extend(self.entities.iter().cloned().map(SimEvent::EntityUpdated));
        log::info!("simulation reset ({} units)", self.entities.len());
        self.narrate("Simulation reset");
    }

    fn update_route(&mut self, callsign: &str, path: &[Coordinate]) {
        let Some(entity) = self.entities.iter_mut().find(|e| e.callsign == callsign) else {
            log::debug!("route update for unknown unit '{callsign}' ignored");
            return;
        };
        entity.assign_route(path);
        self.narrate(format!("Route updated for {callsign}"));
    }

    fn measure(&mut self, from: &str, to: &str) {
        let msg = match (self.entity(from), self.entity(to)) {
            (Some(a), Some(b)) => format!(
                "Distance {from} -> {to}: {:.1} m",
                a.position().distance_to(&b.position())
            ),
            (None, _) => format!("Cannot measure: unknown unit {from}"),
            (_, None) => format!("Cannot measure: unknown unit {to}"),
        };
        self.narrate(msg);
    }
}
