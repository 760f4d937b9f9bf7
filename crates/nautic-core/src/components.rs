//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in systems, not components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::Facing;

/// World position (units, y up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Orientation in degrees, counter-clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation(pub f32);

/// Circular trigger shape used for contact detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
    pub enabled: bool,
}

impl Collider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            enabled: true,
        }
    }
}

/// Marks an entity owned by the object pool. Inactive entities are skipped by
/// every system until they are spawned again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pooled {
    pub active: bool,
}

/// Pending self-deactivation. Removing the component cancels it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Expiry {
    pub remaining_secs: f32,
}

/// Player submarine control state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pilot {
    pub facing: Facing,
    /// Nose tilt in degrees, positive = nose up.
    pub tilt_deg: f32,
    /// Propeller / hull animation enabled.
    pub animating: bool,
    /// Wake bubble emitter state.
    pub wake_emitting: bool,
    /// Wake particles per second while emitting.
    pub wake_rate: f32,
}

/// Vertical drift with horizontal sway, shared by mines and bubbles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Drift {
    /// Sway centre line.
    pub anchor_x: f32,
    /// Vertical speed, negative falls.
    pub vertical_speed: f32,
    pub sway_amount: f32,
    pub sway_speed: f32,
    /// Random phase so instances do not sway in lockstep.
    pub phase_offset: f32,
}

/// Contact payload of a mine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MineCharge {
    pub damage: f32,
    /// Seconds removed from the clock on contact (0 disables).
    pub time_penalty: f32,
    pub triggered: bool,
}

/// Contact payload of an air bubble.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AirPocket {
    pub time_bonus: f32,
    pub triggered: bool,
}

/// Wandering fish state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wander {
    pub home: Vec2,
    pub target: Vec2,
    /// Elapsed time at which a new target is picked.
    pub next_retarget_at: f32,
    pub facing: Facing,
    pub collected: bool,
    /// Sprite hidden while the collect cue plays out.
    pub visible: bool,
}
