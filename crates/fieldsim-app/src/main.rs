use anyhow::{anyhow, Context, Result};
use clap::Parser;

use fieldsim_app::cli::Args;
use fieldsim_app::game_loop;
use fieldsim_app::ipc::{self, JsonLinesSink};
use fieldsim_app::state::LoopCommand;
use fieldsim_sim::scenario::Scenario;
use fieldsim_sim::SimulationEngine;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::default_skirmish(),
    };
    let engine = SimulationEngine::with_scenario(args.sim_config(), &scenario)?;

    let sink = JsonLinesSink::new(std::io::stdout());
    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, sink)?;

    if !args.no_initial_sync {
        cmd_tx.send(LoopCommand::Sync)?;
    }

    let forwarded = ipc::forward_commands(std::io::stdin().lock(), &cmd_tx)?;
    log::info!("input closed after {forwarded} commands");

    // The loop may already be gone after a shutdown request.
    let _ = cmd_tx.send(LoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| anyhow!("simulation loop panicked"))?;
    Ok(())
}
