//! Camera rig: critically damped follow of the submarine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec2,
    velocity: Vec2,
}

impl CameraRig {
    /// Jump straight to `target` and stop.
    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target;
        self.velocity = Vec2::ZERO;
    }

    /// Ease toward `target`, settling in roughly `damping_secs`.
    pub fn follow(&mut self, target: Vec2, damping_secs: f32, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let smooth = damping_secs.max(1e-4);
        let omega = 2.0 / smooth;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = self.position - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        self.position = target + (change + temp) * decay;
    }
}
