//! Combat pass for the unit that just moved.
//!
//! Only the mover looks for targets; the reverse check happens on the
//! target's own turn if it is still active by then.

use fieldsim_core::events::SimEvent;
use fieldsim_core::types::Entity;

use crate::combat::CombatLog;

/// Let `roster[attacker]` engage every active opposing unit within `range_m`.
///
/// Returns the number of engagements resolved.
pub fn run(
    roster: &mut [Entity],
    attacker: usize,
    range_m: f64,
    time: f64,
    combat: &mut CombatLog,
    events: &mut Vec<SimEvent>,
) -> usize {
    let shooter = roster[attacker].clone();
    let origin = shooter.position();
    let mut resolved = 0;

    for target in roster.iter_mut() {
        if !shooter.can_target(target) || origin.distance_to(&target.position()) > range_m {
            continue;
        }
        resolved += 1;

        let hit = combat.resolve(time, &shooter.callsign, &target.callsign);
        if hit && target.active {
            target.active = false;
            log::info!(
                "t={time:.2} {} destroyed {}",
                shooter.callsign,
                target.callsign
            );
            events.push(SimEvent::EntityDestroyed(target.clone()));
            events.push(SimEvent::log(
                format!("{} destroyed {}", shooter.callsign, target.callsign),
                time,
            ));
        } else {
            events.push(SimEvent::log(
                format!("{} engaged {} but missed", shooter.callsign, target.callsign),
                time,
            ));
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsim_core::enums::{Side, UnitType};
    use fieldsim_core::types::Coordinate;

    const METER: f64 = 1.0 / 111_195.0;

    fn unit(callsign: &str, side: Side, north_m: f64) -> Entity {
        Entity::new(
            callsign,
            UnitType::Infantry,
            side,
            Coordinate::new(49.0 + north_m * METER, 17.0),
            vec![Coordinate::new(50.0, 17.0)],
        )
    }

    #[test]
    fn test_only_opposing_active_units_in_range() {
        let mut roster = vec![
            unit("Alpha1", Side::Ally, 0.0),
            unit("Bravo2", Side::Ally, 10.0),
            unit("Xray1", Side::Enemy, 100.0),
            unit("Zulu2", Side::Enemy, 400.0),
            unit("Yankee3", Side::Enemy, 20.0),
        ];
        roster[4].active = false;

        let mut combat = CombatLog::new(0.0, 1);
        let mut events = Vec::new();
        let resolved = run(&mut roster, 0, 150.0, 1.0, &mut combat, &mut events);

        assert_eq!(resolved, 1, "only Xray1 is eligible");
        assert_eq!(combat.len(), 1);
        assert!(combat.outcome(1.0, "Alpha1", "Xray1").is_some());
        assert_eq!(
            events[0].message(),
            Some("Alpha1 engaged Xray1 but missed")
        );
    }

    #[test]
    fn test_hit_destroys_target() {
        let mut roster = vec![unit("Alpha1", Side::Ally, 0.0), unit("Xray1", Side::Enemy, 50.0)];
        let mut combat = CombatLog::new(1.0, 1);
        let mut events = Vec::new();
        run(&mut roster, 0, 150.0, 2.0, &mut combat, &mut events);

        assert!(!roster[1].active);
        assert!(roster[0].active);
        assert!(matches!(&events[0], SimEvent::EntityDestroyed(e) if e.callsign == "Xray1" && !e.active));
        assert_eq!(events[1].message(), Some("Alpha1 destroyed Xray1"));
    }

    #[test]
    fn test_same_side_units_never_engage() {
        let mut roster = vec![unit("Xray1", Side::Enemy, 0.0), unit("Zulu2", Side::Enemy, 5.0)];
        let mut combat = CombatLog::new(1.0, 1);
        let mut events = Vec::new();
        assert_eq!(run(&mut roster, 0, 150.0, 1.0, &mut combat, &mut events), 0);
        assert!(events.is_empty());
    }
}
