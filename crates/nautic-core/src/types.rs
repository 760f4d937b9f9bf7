//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Frame ticks since the round started.
    pub tick: u64,
    /// Physics ticks since the round started.
    pub fixed_tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Linear RGBA colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const GREEN: Rgba = Rgba([0.0, 1.0, 0.0, 1.0]);
    pub const RED: Rgba = Rgba([1.0, 0.0, 0.0, 1.0]);

    /// Interpolate from `self` (t = 0) to `other` (t = 1); `t` is clamped.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0.0; 4];
        for (i, c) in out.iter_mut().enumerate() {
            *c = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        Rgba(out)
    }
}

/// Axis-aligned play field (the background sprite's bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub center: Vec2,
    pub size: Vec2,
}

impl FieldBounds {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    pub fn top(&self) -> f32 {
        self.max().y
    }

    pub fn bottom(&self) -> f32 {
        self.min().y
    }

    /// A field with no area cannot host spawns.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Horizontal spawn range, inset by `margin` from both edges.
    /// Returns `None` when the inset leaves no room.
    pub fn spawn_span(&self, margin: f32) -> Option<(f32, f32)> {
        let min_x = self.min().x + margin;
        let max_x = self.max().x - margin;
        (min_x <= max_x).then_some((min_x, max_x))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            size: Vec2::new(crate::constants::FIELD_WIDTH, crate::constants::FIELD_HEIGHT),
        }
    }
}
