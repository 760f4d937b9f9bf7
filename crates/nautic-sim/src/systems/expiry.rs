//! Expiry system: counts down pending self-deactivations.
//!
//! Pooled entities go back to the pool, fish are despawned. Cancelling a
//! countdown is just removing the component.

use hecs::{Entity, World};

use nautic_core::components::Expiry;
use nautic_core::enums::EntityKind;

use crate::pool::{EntityPool, ObjectPool};

pub fn run(world: &mut World, pool: &mut EntityPool, dt: f32, buffer: &mut Vec<Entity>) {
    buffer.clear();
    for (entity, expiry) in world.query_mut::<&mut Expiry>() {
        expiry.remaining_secs -= dt;
        if expiry.remaining_secs <= 0.0 {
            buffer.push(entity);
        }
    }

    for entity in buffer.drain(..) {
        let kind = world.get::<&EntityKind>(entity).map(|k| *k);
        match kind {
            Ok(kind) if kind.is_pooled() => pool.return_to_pool(world, kind, entity),
            Ok(EntityKind::Fish) => {
                let _ = world.despawn(entity);
            }
            _ => {
                let _ = world.remove_one::<Expiry>(entity);
            }
        }
    }
}
