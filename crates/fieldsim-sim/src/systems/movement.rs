//! Waypoint following.
//!
//! A unit covers at most `budget` meters per tick toward the head of its
//! path. Partial moves interpolate lat/lon linearly (planar), while the
//! arrival test uses haversine distance.

use fieldsim_core::types::{Coordinate, Entity};

/// Result of moving one unit for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// The path was already empty; the unit did not move.
    PathExhausted,
    /// The unit reached and consumed the head waypoint.
    Arrived { waypoint: Coordinate },
    /// The unit moved part of the way toward the head waypoint.
    Advanced { toward: Coordinate },
}

/// Move `entity` toward its next waypoint by at most `budget` meters and
/// update its heading.
pub fn advance(entity: &mut Entity, budget: f64) -> Movement {
    let Some(next) = entity.path.front().copied() else {
        return Movement::PathExhausted;
    };
    let start = entity.position();
    let dist = start.distance_to(&next);

    if dist <= budget {
        entity.set_position(next);
        entity.path.pop_front();
        entity.heading = match entity.path.front() {
            Some(following) => next.bearing_to(following),
            // Last waypoint: keep facing along the segment just travelled.
            None if start != next => start.bearing_to(&next),
            None => entity.heading,
        };
        Movement::Arrived { waypoint: next }
    } else {
        let moved = start.lerp_toward(&next, budget / dist);
        entity.set_position(moved);
        entity.heading = moved.bearing_to(&next);
        Movement::Advanced { toward: next }
    }
}

/// Distance budget for one tick.
pub fn budget(speed: f64, step_duration_secs: f64, simulation_speed: f64) -> f64 {
    speed * step_duration_secs * simulation_speed
}
