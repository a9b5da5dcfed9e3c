//! Simulation loop thread: the single writer of engine state.
//!
//! The engine is moved into this thread. Commands arrive over an `mpsc`
//! channel and automatic ticks fire when the engine's cadence is due; both
//! are handled one at a time, so a command never lands mid-tick. Events go
//! to the sink in the order the engine produced them.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Instant;

use fieldsim_core::events::EventSink;
use fieldsim_sim::SimulationEngine;

use crate::state::LoopCommand;

/// Spawns the simulation loop in a new thread.
///
/// Returns the command sender and a handle that yields the sink back when
/// the loop exits.
pub fn spawn_game_loop<S>(
    engine: SimulationEngine,
    sink: S,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<S>)>
where
    S: EventSink + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("fieldsim-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, sink))?;

    Ok((cmd_tx, handle))
}

/// The loop. Runs until a Shutdown command or channel disconnect.
fn run_game_loop<S: EventSink>(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    mut sink: S,
) -> S {
    log::info!("simulation loop started ({} units)", engine.entities().len());

    loop {
        // 1. Fire the automatic tick if one is due
        sink.publish_all(engine.poll_cadence(Instant::now()));

        // 2. Wait for a command, but no longer than the next tick
        let received = match engine.time_until_next_tick(Instant::now()) {
            Some(wait) => cmd_rx.recv_timeout(wait),
            None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(LoopCommand::Sim(command)) => {
                log::debug!("command {command:?}");
                sink.publish_all(engine.execute(command));
            }
            Ok(LoopCommand::Sync) => sink.publish_all(engine.observer_snapshot()),
            Ok(LoopCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    log::info!(
        "simulation loop stopped at step {} ({})",
        engine.step_id(),
        engine.time().clock()
    );
    sink
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use fieldsim_core::commands::{ControlAction, SimCommand};
    use fieldsim_core::events::SimEvent;
    use fieldsim_sim::config::SimConfig;
    use fieldsim_sim::scenario::Scenario;

    fn engine(tick_interval: Duration) -> SimulationEngine {
        let config = SimConfig {
            tick_interval,
            ..Default::default()
        };
        SimulationEngine::with_scenario(config, &Scenario::default_skirmish()).unwrap()
    }

    #[test]
    fn test_commands_processed_in_order() {
        let (tx, handle) =
            spawn_game_loop(engine(Duration::from_secs(60)), Vec::<SimEvent>::new()).unwrap();

        tx.send(LoopCommand::Sync).unwrap();
        tx.send(LoopCommand::Sim(SimCommand::control(ControlAction::Step)))
            .unwrap();
        tx.send(LoopCommand::Sim(SimCommand::control(ControlAction::Reverse)))
            .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let events = handle.join().unwrap();
        let created = events
            .iter()
            .take_while(|e| matches!(e, SimEvent::EntityCreated(_)))
            .count();
        assert_eq!(created, 8, "sync comes first");
        assert_eq!(events[8], SimEvent::TimeUpdate(0.0));

        let messages: Vec<&str> = events.iter().filter_map(SimEvent::message).collect();
        let step = messages.iter().position(|m| *m == "Simulation step").unwrap();
        let back = messages
            .iter()
            .position(|m| *m == "Stepped back in time.")
            .unwrap();
        assert!(step < back);
    }

    #[test]
    fn test_disconnect_stops_loop() {
        let (tx, handle) =
            spawn_game_loop(engine(Duration::from_secs(60)), Vec::<SimEvent>::new()).unwrap();
        drop(tx);
        let events = handle.join().unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_cadence_drives_ticks_while_playing() {
        // One long march so the run cannot finish on its own.
        let scenario = Scenario::from_json(
            r#"{"units":[{"callsign":"Walker","type":"infantry","side":"ally",
                "lat":49.6,"lon":17.5,"path":[{"lat":49.7,"lon":17.5}]}]}"#,
        )
        .unwrap();
        let config = SimConfig {
            tick_interval: Duration::from_millis(5),
            ..Default::default()
        };
        let engine = SimulationEngine::with_scenario(config, &scenario).unwrap();
        let (tx, handle) = spawn_game_loop(engine, Vec::<SimEvent>::new()).unwrap();

        tx.send(LoopCommand::Sim(SimCommand::control(ControlAction::Play)))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));
        tx.send(LoopCommand::Sim(SimCommand::control(ControlAction::Pause)))
            .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let events = handle.join().unwrap();
        let ticks = events
            .iter()
            .filter(|e| matches!(e, SimEvent::TimeUpdate(_)))
            .count();
        assert!(ticks >= 1, "expected automatic ticks, got {ticks}");

        let messages: Vec<&str> = events.iter().filter_map(SimEvent::message).collect();
        assert_eq!(messages.first(), Some(&"Simulation started"));
        assert!(messages.contains(&"Simulation paused"));
    }
}
