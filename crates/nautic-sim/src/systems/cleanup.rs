//! Cleanup system: returns mines that sank below the kill plane and bubbles
//! that rose past the top of the field.

use hecs::{Entity, World};

use nautic_core::components::{Pooled, Position};
use nautic_core::config::GameConfig;
use nautic_core::enums::EntityKind;

use crate::pool::{EntityPool, ObjectPool};

pub fn run(world: &mut World, pool: &mut EntityPool, config: &GameConfig, buffer: &mut Vec<Entity>) {
    buffer.clear();
    let bubble_ceiling = config.field.bounds.top() + config.field.spawn_offset;

    for (entity, (kind, pos, pooled)) in world.query_mut::<(&EntityKind, &Position, &Pooled)>() {
        if !pooled.active {
            continue;
        }
        let gone = match kind {
            EntityKind::Mine => pos.0.y < config.mines.kill_plane_y,
            EntityKind::AirBubble => pos.0.y > bubble_ceiling,
            _ => false,
        };
        if gone {
            buffer.push(entity);
        }
    }

    for entity in buffer.drain(..) {
        if let Ok(kind) = world.get::<&EntityKind>(entity).map(|k| *k) {
            pool.return_to_pool(world, kind, entity);
        }
    }
}
