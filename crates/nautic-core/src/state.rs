//! Game state snapshot, the complete visible state handed to the host each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{Rgba, SimTime};

/// Complete game state returned after each frame tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub submarine: SubmarineView,
    pub hud: HudView,
    pub mines: Vec<DriftView>,
    pub bubbles: Vec<DriftView>,
    pub fish: Vec<FishView>,
    pub camera: Vec2,
    pub audio_events: Vec<AudioEvent>,
    pub game_events: Vec<GameEvent>,
    /// Scene change requested during this frame, if any.
    pub scene_request: Option<SceneRequest>,
}

/// Player submarine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmarineView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub tilt_deg: f32,
    pub animating: bool,
    pub wake_emitting: bool,
    pub wake_rate: f32,
    pub health: f32,
    pub max_health: f32,
    pub time_left: f32,
    pub max_time: f32,
}

/// An active mine or bubble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftView {
    pub id: u64,
    pub position: Vec2,
    pub rotation_deg: f32,
    /// Explosion / pop effect playing.
    pub triggered: bool,
}

/// A fish still in the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishView {
    pub id: u64,
    pub position: Vec2,
    pub facing: Facing,
    pub visible: bool,
}

/// One fill bar (health or time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarView {
    /// Fill fraction in `[0, 1]`.
    pub fill: f32,
    pub color: Rgba,
    pub text: String,
}

impl Default for BarView {
    fn default() -> Self {
        Self {
            fill: 1.0,
            color: Rgba::GREEN,
            text: String::new(),
        }
    }
}

/// Everything the UI layer shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub health: BarView,
    pub time: BarView,
    pub fish_count: u32,
    pub fish_needed: u32,
    pub fish_text: String,
    /// Warning image shown (clock ran out).
    pub warning_visible: bool,
    /// Looping warning alarm playing.
    pub warning_alarm: bool,
    pub game_over_panel: bool,
    pub win_panel: bool,
    /// On-screen joystick shown and accepting input.
    pub controls_enabled: bool,
    pub volume: f32,
}
