//! Game loop thread: renders frames at [`FRAME_RATE`] and steps physics at
//! the fixed rate in between, storing each snapshot for polling.
//!
//! The engine is created inside the thread so the thread owns it outright.
//! Commands arrive via an `mpsc` channel.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use nautic_core::constants::{FIXED_DT, FRAME_RATE};
use nautic_core::events::GameEvent;
use nautic_core::state::GameStateSnapshot;
use nautic_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Duration of one rendered frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Never run more physics steps than this per frame after a stall.
const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

/// Splits wall-clock frames into fixed physics steps.
#[derive(Debug, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    /// Run the physics steps owed for `dt`, then the frame itself.
    pub fn advance(&mut self, engine: &mut SimulationEngine, dt: f32) -> GameStateSnapshot {
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= FIXED_DT && steps < MAX_FIXED_STEPS_PER_FRAME {
            engine.fixed_tick();
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS_PER_FRAME {
            // Drop the backlog rather than spiral.
            self.accumulator = self.accumulator.min(FIXED_DT);
        }
        engine.tick(dt)
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("nautic-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    log::debug!("game loop started with seed {}", config.seed);
    let mut engine = SimulationEngine::new(config);
    let mut clock = FrameClock::default();
    let mut next_frame_time = Instant::now();
    let mut last_frame = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    log::debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Physics steps and one frame
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;
        let snapshot = clock.advance(&mut engine, dt);
        log_events(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

fn log_events(snapshot: &GameStateSnapshot) {
    for event in &snapshot.game_events {
        match event {
            GameEvent::GameOver => log::info!("submarine lost at t={:.1}s", snapshot.time.elapsed_secs),
            GameEvent::GameWon => log::info!("level won at t={:.1}s", snapshot.time.elapsed_secs),
            other => log::debug!("{other:?}"),
        }
    }
    if let Some(request) = snapshot.scene_request {
        log::info!("scene change requested: {request:?}");
    }
}
