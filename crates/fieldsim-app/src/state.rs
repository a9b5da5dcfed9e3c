//! Messages accepted by the simulation loop thread.

use fieldsim_core::commands::SimCommand;

/// Commands sent from the transport to the loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// An operator command to apply to the engine.
    Sim(SimCommand),
    /// Re-send the observer snapshot (a new observer attached).
    Sync,
    /// Shut down the loop thread gracefully.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsim_core::commands::ControlAction;
    use std::sync::mpsc;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Sync).unwrap();
        tx.send(LoopCommand::Sim(SimCommand::control(ControlAction::Play)))
            .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                LoopCommand::Sync,
                LoopCommand::Sim(SimCommand::control(ControlAction::Play)),
                LoopCommand::Shutdown,
            ]
        );
    }
}
