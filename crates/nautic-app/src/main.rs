//! Headless Aqua Nautic runner.
//!
//! Usage: `aqua-nautic [CONFIG.json] [--seconds N] [--seed N]`, see `--help`.
//!
//! Plays one round with the autopilot and logs how it went. `RUST_LOG`
//! controls verbosity (default `info`).

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use nautic_app::autopilot;
use nautic_app::cli::CliArgs;
use nautic_app::control;
use nautic_app::state::AppState;
use nautic_core::commands::PlayerCommand;
use nautic_core::config::GameConfig;
use nautic_core::enums::GamePhase;
use nautic_sim::SimConfig;

/// How often the autopilot looks at the latest snapshot.
const AUTOPILOT_PERIOD: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::info!("Aqua Nautic headless run, seed {}", args.seed);

    let state = AppState::new();
    control::start_simulation(
        &state,
        SimConfig {
            seed: args.seed,
            game,
        },
    )?;
    control::send_command(&state, PlayerCommand::StartRound)?;

    let deadline = Instant::now() + args.run_duration();
    let mut last = None;
    while Instant::now() < deadline {
        std::thread::sleep(AUTOPILOT_PERIOD);
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        if matches!(snapshot.phase, GamePhase::GameOver | GamePhase::Won) {
            last = Some(snapshot);
            break;
        }
        if let Some(command) = autopilot::next_command(&snapshot) {
            control::send_command(&state, command)?;
        }
        last = Some(snapshot);
    }

    control::stop_simulation(&state)?;

    match last {
        Some(snapshot) => log::info!(
            "finished {:?} after {:.1}s: {} fish, health {}, time {}",
            snapshot.phase,
            snapshot.time.elapsed_secs,
            snapshot.hud.fish_text,
            snapshot.hud.health.text,
            snapshot.hud.time.text,
        ),
        None => log::warn!("no frames were produced"),
    }
    Ok(())
}
