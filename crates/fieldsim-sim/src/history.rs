//! Bounded stack of roster snapshots for step-back.

use std::collections::VecDeque;

use fieldsim_core::types::Entity;

/// Fixed-capacity snapshot stack. Pushing past capacity discards the oldest
/// snapshot. Snapshots are owned clones, independent of the live roster.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: VecDeque<Vec<Entity>>,
    capacity: usize,
}

impl SnapshotHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    /// Store a copy of `roster` as the most recent snapshot.
    pub fn push(&mut self, roster: &[Entity]) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(roster.to_vec());
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<Vec<Entity>> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
