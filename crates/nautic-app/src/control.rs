//! Control surface over a running game loop: the calls a frontend would make.

use anyhow::{anyhow, bail, Context};

use nautic_core::commands::PlayerCommand;
use nautic_core::state::GameStateSnapshot;
use nautic_sim::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation on its own thread. Fails if it is already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> anyhow::Result<()> {
    let mut tx_lock = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
    if tx_lock.is_some() {
        bail!("simulation already running");
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
        .context("failed to start game loop")?;

    *tx_lock = Some(cmd_tx);
    if let Ok(mut handle_lock) = state.loop_handle.lock() {
        *handle_lock = Some(handle);
    }
    Ok(())
}

/// Forward a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> anyhow::Result<()> {
    let tx_lock = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .context("game loop has stopped"),
        None => bail!("simulation not started"),
    }
}

/// Latest snapshot, `None` before the first frame.
pub fn get_snapshot(state: &AppState) -> anyhow::Result<Option<GameStateSnapshot>> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|e| anyhow!("snapshot lock poisoned: {e}"))?;
    Ok(lock.clone())
}

/// Ask the loop to shut down and wait for it. Stopping a stopped
/// simulation is a no-op.
pub fn stop_simulation(state: &AppState) -> anyhow::Result<()> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?
        .take();
    if let Some(tx) = tx {
        // A closed channel means the loop is already gone.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }

    let handle = state
        .loop_handle
        .lock()
        .map_err(|e| anyhow!("loop handle lock poisoned: {e}"))?
        .take();
    if let Some(handle) = handle {
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nautic_core::enums::GamePhase;
    use std::time::{Duration, Instant};

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(send_command(&state, PlayerCommand::StartRound).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
        assert!(stop_simulation(&state).is_ok());
    }

    #[test]
    fn test_start_send_stop() {
        let state = AppState::new();
        start_simulation(&state, SimConfig::default()).unwrap();
        assert!(start_simulation(&state, SimConfig::default()).is_err());
        send_command(&state, PlayerCommand::StartRound).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut phase = GamePhase::Home;
        while Instant::now() < deadline {
            if let Some(snap) = get_snapshot(&state).unwrap() {
                phase = snap.phase;
                if phase == GamePhase::Playing {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(phase, GamePhase::Playing);

        stop_simulation(&state).unwrap();
        assert!(send_command(&state, PlayerCommand::Pause).is_err());
    }
}
