//! Fish wander system.
//!
//! Each fish drifts toward a random point near its home, picks a new point on
//! a jittered interval, bobs vertically and turns to face where it swims.

use std::f32::consts::TAU;

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use nautic_core::components::{Position, Wander};
use nautic_core::config::FishConfig;
use nautic_core::constants::FISH_ARRIVE_DISTANCE;
use nautic_core::enums::Facing;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, fish: &FishConfig, elapsed: f32, dt: f32) {
    for (_entity, (pos, wander)) in world.query_mut::<(&mut Position, &mut Wander)>() {
        if wander.collected {
            continue;
        }

        if elapsed >= wander.next_retarget_at {
            wander.target = wander.home + random_in_circle(rng) * fish.wander_radius;
            let jitter_span = fish.direction_jitter_secs.abs();
            let jitter = rng.gen_range(-jitter_span..=jitter_span);
            wander.next_retarget_at = elapsed + fish.direction_interval_secs + jitter;
        }

        let to_target = wander.target - pos.0;
        if to_target.length() <= FISH_ARRIVE_DISTANCE {
            continue;
        }

        let direction = to_target.normalize_or_zero();
        pos.0 += direction * fish.swim_speed * dt;
        pos.0.y += elapsed.sin() * fish.vertical_bob * dt;

        if direction.x > 0.0 && wander.facing == Facing::Left {
            wander.facing = Facing::Right;
        } else if direction.x < 0.0 && wander.facing == Facing::Right {
            wander.facing = Facing::Left;
        }
    }
}

/// Uniform sample inside the unit circle.
fn random_in_circle(rng: &mut ChaCha8Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen::<f32>().sqrt();
    Vec2::new(angle.cos(), angle.sin()) * radius
}
