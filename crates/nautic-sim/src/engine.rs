//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world together with the vitals, the
//! HUD, the object pool and the spawners. The host drives it through three
//! calls: [`SimulationEngine::tick`] once per rendered frame,
//! [`SimulationEngine::fixed_tick`] at the physics rate and
//! [`SimulationEngine::on_contact`] for trigger hits it detects itself.
//! Completely headless, so every rule can be tested deterministically.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use nautic_core::commands::PlayerCommand;
use nautic_core::components::Position;
use nautic_core::config::GameConfig;
use nautic_core::constants::FIXED_DT;
use nautic_core::enums::{EntityKind, GamePhase, InputSource, SceneRequest};
use nautic_core::state::GameStateSnapshot;
use nautic_core::types::SimTime;
use nautic_logic::hud::Hud;
use nautic_logic::vitals::VitalState;

use crate::pool::EntityPool;
use crate::systems;
use crate::systems::camera::CameraRig;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::spawner::Spawner;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Game tuning.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// Latest directional input per source.
#[derive(Debug, Clone, Copy, Default)]
struct InputState {
    axes: Vec2,
    joystick: Vec2,
    mobile: bool,
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    time: SimTime,
    phase: GamePhase,
    level: u32,
    rng: ChaCha8Rng,
    vitals: VitalState,
    hud: Hud,
    pool: EntityPool,
    submarine: Entity,
    mine_spawner: Spawner,
    bubble_spawner: Spawner,
    input: InputState,
    camera: CameraRig,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    contact_buffer: Vec<Entity>,
    scene_request: Option<SceneRequest>,
}

impl SimulationEngine {
    /// Create a new simulation engine in the home phase.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game.validated();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let start = game.field.bounds.center;
        let submarine = world_setup::spawn_submarine(&mut world, &game.pilot, start);
        let pool = world_setup::build_pool(&mut world, &game);
        let mine_spawner = Spawner::for_mines(&game, &pool, &mut rng);
        let bubble_spawner = Spawner::for_bubbles(&game, &pool, &mut rng);

        let mut hud = Hud::new(game.hud.clone());
        let mut vitals = VitalState::new(&game.vitals);
        vitals.reset(&mut hud);
        // Nothing has been heard yet; start the first frame with a clean slate.
        let _ = hud.take_audio_events();
        let _ = hud.take_game_events();

        let mut camera = CameraRig::default();
        camera.snap_to(start + game.camera.offset);

        let input = InputState {
            mobile: game.pilot.mobile_controls,
            ..Default::default()
        };

        Self {
            world,
            config: game,
            time: SimTime::default(),
            phase: GamePhase::default(),
            level: 0,
            rng,
            vitals,
            hud,
            pool,
            submarine,
            mine_spawner,
            bubble_spawner,
            input,
            camera,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            contact_buffer: Vec::new(),
            scene_request: None,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one rendered frame of `dt` seconds and return the resulting
    /// snapshot. Non-positive or non-finite `dt` only processes commands.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.world_running() && dt.is_finite() && dt > 0.0 {
            self.time.advance(dt);
            if self.phase == GamePhase::Playing {
                self.vitals.tick(dt, &mut self.hud);
                // A round lost to the clock spawns nothing more this frame.
                self.refresh_phase();
            }
            self.run_frame_systems(dt);
        }
        self.refresh_phase();

        let audio_events = self.hud.take_audio_events();
        let game_events = self.hud.take_game_events();
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                level: self.level,
                submarine: self.submarine,
                vitals: &self.vitals,
                hud: &self.hud,
                camera: self.camera.position,
                audio_events,
                game_events,
                scene_request: self.scene_request.take(),
            },
        )
    }

    /// Advance one physics step of [`FIXED_DT`]: submarine control, then the
    /// overlap pass.
    pub fn fixed_tick(&mut self) {
        if !self.world_running() {
            return;
        }
        self.time.fixed_tick += 1;

        let halted =
            self.hud.is_game_over() || self.hud.is_game_won() || self.vitals.is_depleted();
        let input = self.active_input();
        systems::pilot::run(
            &mut self.world,
            self.submarine,
            &self.config.pilot,
            &self.config.field.bounds,
            input,
            halted,
            FIXED_DT,
        );

        if self.phase == GamePhase::Playing {
            let mut hits = std::mem::take(&mut self.contact_buffer);
            systems::contact::detect(&self.world, self.submarine, &mut hits);
            for &other in &hits {
                if self.hud.round_over() {
                    break;
                }
                self.resolve_contact(other);
            }
            self.contact_buffer = hits;
        }
        self.refresh_phase();
    }

    /// Host physics callback: `a` and `b` started touching. Only contacts
    /// involving the submarine matter. Returns whether anything happened.
    pub fn on_contact(&mut self, a: Entity, b: Entity) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let other = if a == self.submarine {
            b
        } else if b == self.submarine {
            a
        } else {
            return false;
        };
        let applied = self.resolve_contact(other);
        self.refresh_phase();
        applied
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Level index, advanced by `NextLevel`.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The player's submarine.
    pub fn submarine(&self) -> Entity {
        self.submarine
    }

    pub fn vitals(&self) -> &VitalState {
        &self.vitals
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Activate a pooled mine or bubble at `position` that holds still.
    #[cfg(test)]
    pub fn spawn_test_drifter(&mut self, kind: EntityKind, position: Vec2) -> Option<Entity> {
        use crate::pool::ObjectPool;
        use nautic_core::components::Drift;

        let entity = self.pool.spawn_from_pool(&mut self.world, kind, position, 0.0)?;
        if let Ok(drift) = self.world.query_one_mut::<&mut Drift>(entity) {
            *drift = Drift {
                anchor_x: position.x,
                ..Default::default()
            };
        }
        Some(entity)
    }

    /// Hand a pooled entity back early, as a kill plane would.
    #[cfg(test)]
    pub fn recycle(&mut self, kind: EntityKind, entity: Entity) {
        use crate::pool::ObjectPool;

        self.pool.return_to_pool(&mut self.world, kind, entity);
    }

    /// Teleport the submarine.
    #[cfg(test)]
    pub fn place_submarine(&mut self, position: Vec2) {
        if let Ok(pos) = self.world.query_one_mut::<&mut Position>(self.submarine) {
            pos.0 = position;
        }
    }

    /// Fish currently in the world, collected ones included.
    #[cfg(test)]
    pub fn fish_entities(&self) -> Vec<Entity> {
        use nautic_core::components::Wander;

        let mut fish: Vec<Entity> = self
            .world
            .query::<&Wander>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        fish.sort_by_key(|e| e.to_bits());
        fish
    }

    /// Drive the vitals directly, bypassing the world.
    #[cfg(test)]
    pub fn damage_submarine(&mut self, damage: f32) {
        self.vitals.take_damage(damage, &mut self.hud);
        self.refresh_phase();
    }

    #[cfg(test)]
    pub fn spawner(&self, kind: EntityKind) -> &Spawner {
        match kind {
            EntityKind::AirBubble => &self.bubble_spawner,
            _ => &self.mine_spawner,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRound => {
                if self.phase == GamePhase::Home {
                    self.start_round();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::RestartLevel => {
                log::info!("restarting level {}", self.level);
                self.start_round();
                self.scene_request = Some(SceneRequest::Restart);
            }
            PlayerCommand::NextLevel => {
                self.level += 1;
                log::info!("advancing to level {}", self.level);
                self.start_round();
                self.scene_request = Some(SceneRequest::Level(self.level));
            }
            PlayerCommand::GoHome => {
                self.clear_round();
                self.hud.stop_ambient();
                self.phase = GamePhase::Home;
                self.scene_request = Some(SceneRequest::Home);
            }
            PlayerCommand::SetInput { source, x, y } => {
                let value = Vec2::new(sanitize_axis(x), sanitize_axis(y));
                match source {
                    InputSource::Axes => self.input.axes = value,
                    InputSource::Joystick => self.input.joystick = value,
                }
            }
            PlayerCommand::SetMobileControls { enabled } => {
                self.input.mobile = enabled;
            }
            PlayerCommand::SetSoundVolume { volume } => {
                self.hud.set_sound_volume(volume);
            }
            PlayerCommand::SetSpawning { kind, enabled } => match kind {
                EntityKind::Mine => self.mine_spawner.set_spawning(enabled),
                EntityKind::AirBubble => self.bubble_spawner.set_spawning(enabled),
                other => log::warn!("no spawner for {}", other.tag()),
            },
        }
    }

    /// Reset everything for a fresh round of the current level.
    fn start_round(&mut self) {
        self.clear_round();
        world_setup::spawn_school(
            &mut self.world,
            &mut self.rng,
            &self.config.fish,
            &self.config.field.bounds,
        );
        self.mine_spawner.reset(&mut self.rng, 0.0);
        self.bubble_spawner.reset(&mut self.rng, 0.0);
        self.hud.start_ambient();
        self.phase = GamePhase::Playing;
        log::info!(
            "round started: level {}, {} fish to find",
            self.level,
            self.hud.total_fish_needed()
        );
    }

    /// Tear down round state: HUD, vitals, pooled and per-round entities,
    /// submarine, clock, camera and held input.
    fn clear_round(&mut self) {
        self.hud.reset_ui();
        self.pool.return_all(&mut self.world);
        world_setup::clear_school(&mut self.world, &mut self.despawn_buffer);

        let start = self.config.field.bounds.center;
        world_setup::reset_submarine(&mut self.world, self.submarine, start);
        self.vitals.reset(&mut self.hud);

        self.time = SimTime::default();
        self.camera.snap_to(start + self.config.camera.offset);
        self.input.axes = Vec2::ZERO;
        self.input.joystick = Vec2::ZERO;
    }

    /// Frame systems, in order.
    fn run_frame_systems(&mut self, dt: f32) {
        let now = self.time.elapsed_secs;

        // 1. Spawning, only while the round is live
        if self.phase == GamePhase::Playing {
            for spawner in [&mut self.mine_spawner, &mut self.bubble_spawner] {
                systems::spawner::run(
                    &mut self.world,
                    &mut self.rng,
                    &mut self.pool,
                    spawner,
                    &self.config,
                    now,
                );
            }
        }
        // 2. Mines sink, bubbles rise
        systems::drift::run(&mut self.world, now, dt);
        // 3. Fish wander
        systems::fish::run(&mut self.world, &mut self.rng, &self.config.fish, now, dt);
        // 4. Finished effects
        systems::expiry::run(&mut self.world, &mut self.pool, dt, &mut self.despawn_buffer);
        // 5. Out of the field
        systems::cleanup::run(
            &mut self.world,
            &mut self.pool,
            &self.config,
            &mut self.despawn_buffer,
        );
        // 6. Camera follow
        if let Ok(pos) = self
            .world
            .get::<&Position>(self.submarine)
            .map(|p| p.0)
        {
            self.camera
                .follow(pos + self.config.camera.offset, self.config.camera.damping_secs, dt);
        }
    }

    fn resolve_contact(&mut self, other: Entity) -> bool {
        systems::contact::resolve(
            &mut self.world,
            &mut self.pool,
            &mut self.vitals,
            &mut self.hud,
            &self.config,
            other,
        )
    }

    /// Input from the joystick when mobile controls are on and the joystick
    /// accepts input, otherwise from the axes.
    fn active_input(&self) -> Vec2 {
        if self.input.mobile && self.hud.controls_enabled() {
            self.input.joystick
        } else {
            self.input.axes
        }
    }

    /// Follow the HUD's panels into the top-level phase.
    fn refresh_phase(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.hud.is_game_over() {
            self.phase = GamePhase::GameOver;
        } else if self.hud.is_game_won() {
            self.phase = GamePhase::Won;
        }
    }

    /// The world keeps animating behind the end-of-round panels.
    fn world_running(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::Playing | GamePhase::GameOver | GamePhase::Won
        )
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
