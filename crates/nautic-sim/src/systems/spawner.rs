//! Spawner system: places pooled mines and bubbles along the field edges on a
//! randomized cadence.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nautic_core::components::Drift;
use nautic_core::config::{GameConfig, Span};
use nautic_core::enums::EntityKind;

use crate::pool::{EntityPool, ObjectPool};

/// Periodic spawner for one pooled kind.
#[derive(Debug, Clone)]
pub struct Spawner {
    pub kind: EntityKind,
    interval: Span,
    /// Horizontal spawn range (already inset by the edge margin).
    span_x: (f32, f32),
    spawn_y: f32,
    /// Elapsed time of the next spawn.
    next_spawn_at: f32,
    /// Player/host toggle.
    enabled: bool,
    /// Startup validation failed; stays off for the session.
    broken: bool,
}

impl Spawner {
    /// Mines enter above the top edge.
    pub fn for_mines(config: &GameConfig, pool: &EntityPool, rng: &mut ChaCha8Rng) -> Self {
        let y = config.field.bounds.top() + config.field.spawn_offset;
        Self::new(EntityKind::Mine, config.mines.spawn_interval, y, config, pool, rng)
    }

    /// Bubbles enter just above the bottom edge.
    pub fn for_bubbles(config: &GameConfig, pool: &EntityPool, rng: &mut ChaCha8Rng) -> Self {
        let y = config.field.bounds.bottom() + config.field.spawn_offset;
        Self::new(EntityKind::AirBubble, config.bubbles.spawn_interval, y, config, pool, rng)
    }

    fn new(
        kind: EntityKind,
        interval: Span,
        spawn_y: f32,
        config: &GameConfig,
        pool: &EntityPool,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let field = &config.field.bounds;
        let span = if field.is_degenerate() {
            None
        } else {
            field.spawn_span(config.field.spawn_margin)
        };

        let broken = match span {
            None => {
                log::error!("{} spawner disabled: play field too small", kind.tag());
                true
            }
            Some(_) if pool.capacity(kind) == 0 => {
                log::error!("{} spawner disabled: no pooled instances", kind.tag());
                true
            }
            Some(_) => false,
        };

        let mut spawner = Self {
            kind,
            interval: interval.validated(),
            span_x: span.unwrap_or((0.0, 0.0)),
            spawn_y,
            next_spawn_at: 0.0,
            enabled: true,
            broken,
        };
        spawner.reset(rng, 0.0);
        spawner
    }

    /// Schedule the first spawn one interval after `now`.
    pub fn reset(&mut self, rng: &mut ChaCha8Rng, now: f32) {
        self.schedule_next(rng, now);
    }

    pub fn set_spawning(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// False when disabled at startup by a configuration problem.
    pub fn is_operational(&self) -> bool {
        !self.broken
    }

    pub fn next_spawn_at(&self) -> f32 {
        self.next_spawn_at
    }

    fn schedule_next(&mut self, rng: &mut ChaCha8Rng, now: f32) {
        self.next_spawn_at = now + rng.gen_range(self.interval.min..=self.interval.max);
    }
}

/// Spawn if due. A failed spawn is logged and retried on the next cycle.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pool: &mut EntityPool,
    spawner: &mut Spawner,
    config: &GameConfig,
    now: f32,
) -> Option<Entity> {
    if spawner.broken || !spawner.enabled || now < spawner.next_spawn_at {
        return None;
    }

    let (min_x, max_x) = spawner.span_x;
    let position = Vec2::new(rng.gen_range(min_x..=max_x), spawner.spawn_y);
    let spawned = pool.spawn_from_pool(world, spawner.kind, position, 0.0);

    match spawned {
        Some(entity) => {
            let drift = roll_drift(spawner.kind, position.x, config, rng);
            if let Ok(d) = world.query_one_mut::<&mut Drift>(entity) {
                *d = drift;
            }
        }
        None => log::warn!("failed to spawn {} from pool", spawner.kind.tag()),
    }

    spawner.schedule_next(rng, now);
    spawned
}

/// Per-instance movement parameters. Mines get randomized fall and sway;
/// bubbles share fixed values and only differ in phase.
fn roll_drift(kind: EntityKind, anchor_x: f32, config: &GameConfig, rng: &mut ChaCha8Rng) -> Drift {
    match kind {
        EntityKind::Mine => {
            let mines = &config.mines;
            Drift {
                anchor_x,
                vertical_speed: -rng.gen_range(mines.fall_speed.min..=mines.fall_speed.max),
                sway_amount: rng.gen_range(mines.oscillation.min..=mines.oscillation.max),
                sway_speed: rng
                    .gen_range(mines.oscillation_speed.min..=mines.oscillation_speed.max),
                phase_offset: rng.gen_range(0.0..TAU),
            }
        }
        _ => {
            let bubbles = &config.bubbles;
            Drift {
                anchor_x,
                vertical_speed: bubbles.float_speed,
                sway_amount: bubbles.oscillation,
                sway_speed: bubbles.oscillation_speed,
                phase_offset: rng.gen_range(0.0..TAU),
            }
        }
    }
}
