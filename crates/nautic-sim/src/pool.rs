//! Object pool for mines and bubbles.
//!
//! Instances are spawned into the world once, inactive, and then toggled on
//! and off instead of being created and destroyed. Returning an instance
//! strips any pending [`Expiry`], so a deactivation scheduled during one
//! activation can never fire during the next.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{Entity, World};

use nautic_core::components::{
    AirPocket, Collider, Expiry, MineCharge, Pooled, Position, Rotation, Velocity,
};
use nautic_core::enums::EntityKind;

/// Pool service consumed by spawners and effects.
pub trait ObjectPool {
    /// Activate an idle instance of `kind` at `position`, turned by
    /// `rotation_deg`. `None` when the pool has nothing idle (or does not
    /// serve `kind`).
    fn spawn_from_pool(
        &mut self,
        world: &mut World,
        kind: EntityKind,
        position: Vec2,
        rotation_deg: f32,
    ) -> Option<Entity>;

    /// Deactivate `entity` and make it available again. Returning an idle or
    /// foreign entity is a no-op.
    fn return_to_pool(&mut self, world: &mut World, kind: EntityKind, entity: Entity);
}

/// Fixed-capacity pool backed by pre-spawned hecs entities.
#[derive(Debug, Default)]
pub struct EntityPool {
    idle: HashMap<EntityKind, Vec<Entity>>,
    members: HashMap<EntityKind, Vec<Entity>>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand an already spawned, inactive entity to the pool.
    pub fn adopt(&mut self, kind: EntityKind, entity: Entity) {
        self.members.entry(kind).or_default().push(entity);
        self.idle.entry(kind).or_default().push(entity);
    }

    pub fn capacity(&self, kind: EntityKind) -> usize {
        self.members.get(&kind).map_or(0, Vec::len)
    }

    pub fn idle_count(&self, kind: EntityKind) -> usize {
        self.idle.get(&kind).map_or(0, Vec::len)
    }

    pub fn active_count(&self, kind: EntityKind) -> usize {
        self.capacity(kind) - self.idle_count(kind)
    }

    /// Every instance of `kind`, active or not.
    pub fn members(&self, kind: EntityKind) -> &[Entity] {
        self.members.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Return every active instance of every kind.
    pub fn return_all(&mut self, world: &mut World) {
        // Fixed kind order keeps the idle stacks, and so later spawns, deterministic.
        for kind in EntityKind::ALL {
            let entities = self.members(kind).to_vec();
            for entity in entities {
                self.return_to_pool(world, kind, entity);
            }
        }
    }

    fn owns(&self, kind: EntityKind, entity: Entity) -> bool {
        self.members
            .get(&kind)
            .is_some_and(|entities| entities.contains(&entity))
    }
}

impl ObjectPool for EntityPool {
    fn spawn_from_pool(
        &mut self,
        world: &mut World,
        kind: EntityKind,
        position: Vec2,
        rotation_deg: f32,
    ) -> Option<Entity> {
        let entity = self.idle.get_mut(&kind)?.pop()?;

        if let Ok(pooled) = world.query_one_mut::<&mut Pooled>(entity) {
            pooled.active = true;
        }
        if let Ok((pos, vel)) = world.query_one_mut::<(&mut Position, &mut Velocity)>(entity) {
            pos.0 = position;
            vel.0 = Vec2::ZERO;
        }
        if let Ok(rotation) = world.query_one_mut::<&mut Rotation>(entity) {
            rotation.0 = rotation_deg;
        }
        if let Ok(collider) = world.query_one_mut::<&mut Collider>(entity) {
            collider.enabled = true;
        }
        if let Ok(charge) = world.query_one_mut::<&mut MineCharge>(entity) {
            charge.triggered = false;
        }
        if let Ok(pocket) = world.query_one_mut::<&mut AirPocket>(entity) {
            pocket.triggered = false;
        }
        let _ = world.remove_one::<Expiry>(entity);

        Some(entity)
    }

    fn return_to_pool(&mut self, world: &mut World, kind: EntityKind, entity: Entity) {
        if !self.owns(kind, entity) {
            log::warn!("{} {:?} does not belong to the pool", kind.tag(), entity);
            return;
        }
        let Ok(pooled) = world.query_one_mut::<&mut Pooled>(entity) else {
            return;
        };
        if !pooled.active {
            return;
        }
        pooled.active = false;

        if let Ok(collider) = world.query_one_mut::<&mut Collider>(entity) {
            collider.enabled = false;
        }
        let _ = world.remove_one::<Expiry>(entity);
        self.idle.entry(kind).or_default().push(entity);
    }
}
