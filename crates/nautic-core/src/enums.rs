//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of a gameplay entity. Hosts that still speak tag strings convert with
/// [`EntityKind::tag`] and [`EntityKind::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Submarine,
    Mine,
    Fish,
    AirBubble,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Submarine,
        EntityKind::Mine,
        EntityKind::Fish,
        EntityKind::AirBubble,
    ];

    /// The exact tag string the host physics layer uses.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Submarine => "Submarine",
            EntityKind::Mine => "Mine",
            EntityKind::Fish => "Fish",
            EntityKind::AirBubble => "AirBubble",
        }
    }

    /// Case-sensitive inverse of [`EntityKind::tag`].
    pub fn from_tag(tag: &str) -> Option<EntityKind> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Whether instances of this kind are recycled through the object pool.
    pub fn is_pooled(self) -> bool {
        matches!(self, EntityKind::Mine | EntityKind::AirBubble)
    }
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Home scene, no round running.
    #[default]
    Home,
    /// Round in progress.
    Playing,
    /// Round suspended by the player.
    Paused,
    /// Submarine destroyed, game-over panel up.
    GameOver,
    /// Fish quota reached, win panel up.
    Won,
}

/// Health/timer state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalPhase {
    #[default]
    Active,
    /// Terminal until an explicit reset.
    GameOver,
}

/// Horizontal facing of the submarine or a fish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn flipped(self) -> Facing {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    pub fn is_right(self) -> bool {
        self == Facing::Right
    }
}

/// Where directional input is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    /// Keyboard / gamepad axes.
    #[default]
    Axes,
    /// On-screen floating joystick (mobile controls).
    Joystick,
}

/// Scene change the host should perform. Opaque to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scene", content = "index")]
pub enum SceneRequest {
    /// Reload the current level.
    Restart,
    /// Load the level with this build index.
    Level(u32),
    /// Go to the home scene.
    Home,
}
