//! Submarine control system, run on the physics tick.
//!
//! Gathers the pilot context from the world, evaluates the controller and
//! integrates the resulting velocity. The hull is kept inside the field.

use glam::Vec2;
use hecs::{Entity, World};

use nautic_core::components::{Pilot, Position, Velocity};
use nautic_core::config::PilotConfig;
use nautic_core::types::FieldBounds;
use nautic_logic::pilot::{evaluate, PilotContext};

pub fn run(
    world: &mut World,
    submarine: Entity,
    tuning: &PilotConfig,
    field: &FieldBounds,
    input: Vec2,
    halted: bool,
    dt: f32,
) {
    let Ok((pos, vel, pilot)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, &mut Pilot)>(submarine)
    else {
        return;
    };

    let update = evaluate(&PilotContext {
        tuning,
        velocity: vel.0,
        facing: pilot.facing,
        tilt_deg: pilot.tilt_deg,
        input: input.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)),
        halted,
    });

    if update.wake_restarted {
        log::trace!("wake restarted after turning {:?}", update.facing);
    }

    vel.0 = update.velocity;
    pilot.facing = update.facing;
    pilot.tilt_deg = update.tilt_deg;
    pilot.animating = update.animating;
    pilot.wake_emitting = update.wake_emitting;
    pilot.wake_rate = update.wake_rate;

    if halted || field.is_degenerate() {
        return;
    }
    let next = pos.0 + vel.0 * dt;
    let clamped = next.clamp(field.min(), field.max());
    // Stop pushing into a wall.
    if clamped.x != next.x {
        vel.0.x = 0.0;
    }
    if clamped.y != next.y {
        vel.0.y = 0.0;
    }
    pos.0 = clamped;
}
