//! Combat resolution with memoized outcomes.
//!
//! Each (time, attacker, target) triple is rolled once; later queries for the
//! same triple return the stored result, so replaying a tick never changes
//! history. Time is keyed at two-decimal precision: two times that format to
//! the same string share one outcome.

use std::collections::HashMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Identity of one engagement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatKey {
    /// Simulated time formatted to two decimals.
    time: String,
    attacker: String,
    target: String,
}

impl CombatKey {
    pub fn new(time: f64, attacker: &str, target: &str) -> Self {
        Self {
            time: format!("{time:.2}"),
            attacker: attacker.to_string(),
            target: target.to_string(),
        }
    }

    /// The encoded time, parsed back from its two-decimal form.
    pub fn time(&self) -> f64 {
        self.time.parse().unwrap_or(f64::NAN)
    }

    pub fn attacker(&self) -> &str {
        &self.attacker
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for CombatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}->{}", self.time, self.attacker, self.target)
    }
}

/// Memoized hit/miss outcomes.
#[derive(Debug, Clone)]
pub struct CombatLog {
    outcomes: HashMap<CombatKey, bool>,
    hit_chance: f64,
    rng: ChaCha8Rng,
}

impl CombatLog {
    /// `hit_chance` is clamped to [0, 1]; NaN counts as 0.
    pub fn new(hit_chance: f64, seed: u64) -> Self {
        let hit_chance = if hit_chance.is_nan() {
            0.0
        } else {
            hit_chance.clamp(0.0, 1.0)
        };
        Self {
            outcomes: HashMap::new(),
            hit_chance,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Whether `attacker` hits `target` at simulated time `time`.
    pub fn resolve(&mut self, time: f64, attacker: &str, target: &str) -> bool {
        let key = CombatKey::new(time, attacker, target);
        let hit_chance = self.hit_chance;
        let rng = &mut self.rng;
        *self
            .outcomes
            .entry(key)
            .or_insert_with(|| rng.gen_bool(hit_chance))
    }

    /// The stored outcome for a triple, without drawing.
    pub fn outcome(&self, time: f64, attacker: &str, target: &str) -> Option<bool> {
        self.outcomes
            .get(&CombatKey::new(time, attacker, target))
            .copied()
    }

    /// Forget every outcome whose encoded time is strictly after `threshold`.
    pub fn rollback(&mut self, threshold: f64) {
        let before = self.outcomes.len();
        self.outcomes.retain(|key, _| !(key.time() > threshold));
        log::debug!(
            "combat log rollback to t={threshold:.2}: dropped {} entries",
            before - self.outcomes.len()
        );
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CombatKey> {
        self.outcomes.keys()
    }
}
