//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, InputSource};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Round control ---
    /// Start a round from the home scene.
    StartRound,
    Pause,
    Resume,
    /// Reload the current level.
    RestartLevel,
    /// Advance to the next level.
    NextLevel,
    /// Leave the round and return to the home scene.
    GoHome,

    // --- Input ---
    /// Latest directional input from one source, each axis in `[-1, 1]`.
    SetInput { source: InputSource, x: f32, y: f32 },
    /// Read input from the joystick instead of the axes.
    SetMobileControls { enabled: bool },

    // --- Settings ---
    SetSoundVolume { volume: f32 },
    /// Toggle the mine or bubble spawner.
    SetSpawning { kind: EntityKind, enabled: bool },
}
