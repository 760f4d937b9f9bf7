//! Submarine movement controller.
//!
//! Pure function evaluated once per physics tick. No ECS dependency: the
//! caller gathers the context and writes the update back.

use glam::Vec2;

use nautic_core::config::PilotConfig;
use nautic_core::enums::Facing;

/// Input to the controller for a single physics tick.
pub struct PilotContext<'a> {
    pub tuning: &'a PilotConfig,
    pub velocity: Vec2,
    pub facing: Facing,
    pub tilt_deg: f32,
    /// Directional input from the active source, each axis in `[-1, 1]`.
    pub input: Vec2,
    /// Round over or submarine destroyed: ignore input and stop.
    pub halted: bool,
}

/// Output from the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotUpdate {
    pub velocity: Vec2,
    pub facing: Facing,
    pub tilt_deg: f32,
    pub animating: bool,
    pub wake_emitting: bool,
    pub wake_rate: f32,
    /// Facing flipped while moving, so the wake emitter restarts.
    pub wake_restarted: bool,
}

pub fn evaluate(ctx: &PilotContext) -> PilotUpdate {
    let tuning = ctx.tuning;

    if ctx.halted {
        // No tilt update either: the hull freezes in its last pose.
        return PilotUpdate {
            velocity: Vec2::ZERO,
            facing: ctx.facing,
            tilt_deg: ctx.tilt_deg,
            animating: false,
            wake_emitting: false,
            wake_rate: 0.0,
            wake_restarted: false,
        };
    }

    let magnitude = ctx.input.length();
    let mut facing = ctx.facing;
    let mut wake_restarted = false;

    let (velocity, animating, wake_rate) = if magnitude > tuning.deadzone {
        let target = ctx.input * tuning.move_speed;
        let velocity = ctx.velocity.lerp(target, tuning.smoothing);

        let wants_right = ctx.input.x > tuning.deadzone && !facing.is_right();
        let wants_left = ctx.input.x < -tuning.deadzone && facing.is_right();
        if wants_right || wants_left {
            facing = facing.flipped();
            wake_restarted = velocity.length() > tuning.deadzone;
        }

        (velocity, true, magnitude * tuning.wake_rate_per_input)
    } else {
        (ctx.velocity * tuning.friction, false, 0.0)
    };

    let tilt_deg = (velocity.y * tuning.tilt_per_velocity)
        .clamp(-tuning.max_tilt_deg, tuning.max_tilt_deg);

    PilotUpdate {
        velocity,
        facing,
        tilt_deg,
        animating,
        wake_emitting: animating,
        wake_rate,
        wake_restarted,
    }
}
