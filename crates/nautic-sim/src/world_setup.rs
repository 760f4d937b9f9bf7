//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the submarine, pre-warms the mine/bubble pool and places the
//! fish school for a level.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nautic_core::components::*;
use nautic_core::config::{BubbleConfig, FishConfig, GameConfig, MineConfig, PilotConfig};
use nautic_core::enums::{EntityKind, Facing};
use nautic_core::types::FieldBounds;

use crate::pool::EntityPool;

/// Spawn the player's submarine at `position`.
pub fn spawn_submarine(world: &mut World, tuning: &PilotConfig, position: Vec2) -> Entity {
    world.spawn((
        EntityKind::Submarine,
        Position(position),
        Velocity::default(),
        Pilot::default(),
        Collider::new(tuning.collider_radius),
    ))
}

/// Put the submarine back at `position`, stopped and facing right.
pub fn reset_submarine(world: &mut World, submarine: Entity, position: Vec2) {
    if let Ok((pos, vel, pilot)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, &mut Pilot)>(submarine)
    {
        pos.0 = position;
        vel.0 = Vec2::ZERO;
        *pilot = Pilot::default();
    }
}

/// Spawn the configured number of idle mines and bubbles and hand them to a
/// new pool.
pub fn build_pool(world: &mut World, config: &GameConfig) -> EntityPool {
    let mut pool = EntityPool::new();
    for _ in 0..config.mines.pool_size {
        let mine = spawn_idle_mine(world, &config.mines);
        pool.adopt(EntityKind::Mine, mine);
    }
    for _ in 0..config.bubbles.pool_size {
        let bubble = spawn_idle_bubble(world, &config.bubbles);
        pool.adopt(EntityKind::AirBubble, bubble);
    }
    pool
}

fn spawn_idle_mine(world: &mut World, mines: &MineConfig) -> Entity {
    world.spawn((
        EntityKind::Mine,
        Pooled { active: false },
        Position::default(),
        Rotation::default(),
        Velocity::default(),
        Drift::default(),
        MineCharge {
            damage: mines.damage,
            time_penalty: mines.time_penalty,
            triggered: false,
        },
        Collider {
            radius: mines.collider_radius,
            enabled: false,
        },
    ))
}

fn spawn_idle_bubble(world: &mut World, bubbles: &BubbleConfig) -> Entity {
    world.spawn((
        EntityKind::AirBubble,
        Pooled { active: false },
        Position::default(),
        Rotation::default(),
        Velocity::default(),
        Drift::default(),
        AirPocket {
            time_bonus: bubbles.time_bonus,
            triggered: false,
        },
        Collider {
            radius: bubbles.collider_radius,
            enabled: false,
        },
    ))
}

/// Scatter `fish.per_level` fish across the field. Homes are inset by the
/// wander radius when the field is large enough.
pub fn spawn_school(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    fish: &FishConfig,
    field: &FieldBounds,
) -> Vec<Entity> {
    if field.is_degenerate() {
        log::error!("play field has no area, no fish placed");
        return Vec::new();
    }

    let inset = Vec2::splat(fish.wander_radius);
    let (mut lo, mut hi) = (field.min() + inset, field.max() - inset);
    if lo.x > hi.x || lo.y > hi.y {
        (lo, hi) = (field.min(), field.max());
    }

    (0..fish.per_level)
        .map(|_| {
            let home = Vec2::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
            world.spawn((
                EntityKind::Fish,
                Position(home),
                Wander {
                    home,
                    target: home,
                    next_retarget_at: 0.0,
                    facing: Facing::Right,
                    collected: false,
                    visible: true,
                },
                Collider::new(fish.collider_radius),
            ))
        })
        .collect()
}

/// Remove every fish, collected or not.
pub fn clear_school(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, kind) in world.query_mut::<&EntityKind>() {
        if *kind == EntityKind::Fish {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
