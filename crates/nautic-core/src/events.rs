//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

/// Audio cues for the host sound system. `volume` is the session volume at
/// the time the cue fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// One-shot clip.
    Play { clip: String, volume: f32 },
    /// Start a looping clip. Never emitted for a loop that is already playing.
    StartLoop { clip: String, volume: f32 },
    /// Stop a looping clip. Never emitted for a loop that is already stopped.
    StopLoop { clip: String },
    /// Change the volume of a loop that is playing.
    SetLoopVolume { clip: String, volume: f32 },
}

/// Gameplay milestones, mostly for logging and the host's own bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MineDetonated { damage: f32 },
    BubblePopped { time_bonus: f32 },
    FishCollected { count: u32 },
    GameOver,
    GameWon,
}
