//! Wall-clock cadence driver for automatic ticks.
//!
//! The driver holds no thread or timer of its own. The owner of the engine
//! asks how long to wait (`time_until_due`) and reports elapsed time back
//! through `take_due`, so commands and ticks stay on a single thread.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Start ticking; the first tick is due one interval from `now`.
    /// Returns false if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Stop ticking. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long until the next tick is due. `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Consume one due tick, if any, and schedule the following one.
    ///
    /// If the caller has fallen more than two intervals behind, the schedule
    /// is reset to `now` instead of firing a burst of catch-up ticks.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.interval;
        self.next_due = Some(if now.duration_since(due) > self.interval * 2 {
            now + self.interval
        } else {
            next
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_start_is_idempotent() {
        let now = Instant::now();
        let mut cadence = Cadence::new(SECOND);
        assert!(cadence.start(now));
        assert!(!cadence.start(now + SECOND * 5), "second start is a no-op");
        assert_eq!(cadence.time_until_due(now), Some(SECOND));
    }

    #[test]
    fn test_stop() {
        let now = Instant::now();
        let mut cadence = Cadence::new(SECOND);
        assert!(!cadence.stop());
        cadence.start(now);
        assert!(cadence.stop());
        assert!(!cadence.is_running());
        assert_eq!(cadence.time_until_due(now), None);
        assert!(!cadence.take_due(now + SECOND * 3));
    }

    #[test]
    fn test_take_due_follows_interval() {
        let t0 = Instant::now();
        let mut cadence = Cadence::new(SECOND);
        cadence.start(t0);

        assert!(!cadence.take_due(t0 + Duration::from_millis(500)));
        assert!(cadence.take_due(t0 + SECOND));
        assert!(!cadence.take_due(t0 + SECOND), "one tick per interval");
        assert!(cadence.take_due(t0 + SECOND * 2 + Duration::from_millis(10)));
        assert_eq!(
            cadence.time_until_due(t0 + SECOND * 2),
            Some(SECOND),
            "schedule stays anchored to the start time"
        );
    }

    #[test]
    fn test_falling_behind_resets_schedule() {
        let t0 = Instant::now();
        let mut cadence = Cadence::new(SECOND);
        cadence.start(t0);

        let late = t0 + SECOND * 10;
        assert!(cadence.take_due(late));
        assert!(!cadence.take_due(late), "no catch-up burst");
        assert_eq!(cadence.time_until_due(late), Some(SECOND));
    }
}
