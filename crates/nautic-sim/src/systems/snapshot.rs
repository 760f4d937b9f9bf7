//! Snapshot system: reads the ECS world and session state into a
//! [`GameStateSnapshot`]. Never modifies the world.

use glam::Vec2;
use hecs::{Entity, World};

use nautic_core::components::*;
use nautic_core::enums::{EntityKind, GamePhase, SceneRequest};
use nautic_core::events::{AudioEvent, GameEvent};
use nautic_core::state::*;
use nautic_core::types::SimTime;
use nautic_logic::hud::Hud;
use nautic_logic::vitals::VitalState;

/// Everything the snapshot needs besides the world.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub submarine: Entity,
    pub vitals: &'a VitalState,
    pub hud: &'a Hud,
    pub camera: Vec2,
    pub audio_events: Vec<AudioEvent>,
    pub game_events: Vec<GameEvent>,
    pub scene_request: Option<SceneRequest>,
}

pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> GameStateSnapshot {
    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        level: inputs.level,
        submarine: build_submarine(world, inputs.submarine, inputs.vitals),
        hud: inputs.hud.view(),
        mines: build_drifters(world, EntityKind::Mine),
        bubbles: build_drifters(world, EntityKind::AirBubble),
        fish: build_fish(world),
        camera: inputs.camera,
        audio_events: inputs.audio_events,
        game_events: inputs.game_events,
        scene_request: inputs.scene_request,
    }
}

fn build_submarine(world: &World, submarine: Entity, vitals: &VitalState) -> SubmarineView {
    let mut view = SubmarineView {
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        facing: Default::default(),
        tilt_deg: 0.0,
        animating: false,
        wake_emitting: false,
        wake_rate: 0.0,
        health: vitals.health(),
        max_health: vitals.max_health(),
        time_left: vitals.time_left(),
        max_time: vitals.max_time(),
    };

    if let Ok(mut query) = world.query_one::<(&Position, &Velocity, &Pilot)>(submarine) {
        if let Some((pos, vel, pilot)) = query.get() {
            view.position = pos.0;
            view.velocity = vel.0;
            view.facing = pilot.facing;
            view.tilt_deg = pilot.tilt_deg;
            view.animating = pilot.animating;
            view.wake_emitting = pilot.wake_emitting;
            view.wake_rate = pilot.wake_rate;
        }
    }
    view
}

/// Active mines or bubbles, ordered by id.
fn build_drifters(world: &World, kind: EntityKind) -> Vec<DriftView> {
    let mut views: Vec<DriftView> = world
        .query::<(
            &EntityKind,
            &Pooled,
            &Position,
            Option<&Rotation>,
            Option<&MineCharge>,
            Option<&AirPocket>,
        )>()
        .iter()
        .filter(|(_, (k, pooled, ..))| **k == kind && pooled.active)
        .map(|(entity, (_, _, pos, rotation, charge, pocket))| DriftView {
            id: entity_id(entity),
            position: pos.0,
            rotation_deg: rotation.map_or(0.0, |r| r.0),
            triggered: charge.is_some_and(|c| c.triggered) || pocket.is_some_and(|p| p.triggered),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

/// Fish still in the level, collected ones included until they despawn.
fn build_fish(world: &World) -> Vec<FishView> {
    let mut views: Vec<FishView> = world
        .query::<(&Position, &Wander)>()
        .iter()
        .map(|(entity, (pos, wander))| FishView {
            id: entity_id(entity),
            position: pos.0,
            facing: wander.facing,
            visible: wander.visible,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

/// Stable numeric id for the host.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
