//! Game configuration.
//!
//! Every section defaults to the values in [`crate::constants`], and every
//! field is optional in JSON so a config file only needs to list overrides.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{FieldBounds, Rgba};

/// Errors raised while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive `[min, max]` range sampled by spawners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Raise `max` to `min` when the range is inverted.
    pub fn validated(self) -> Self {
        Self {
            min: self.min,
            max: self.max.max(self.min),
        }
    }
}

/// A sound clip reference. Playback is the host's job; the simulation only
/// needs the name and how long the clip runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundClip {
    pub name: String,
    pub length_secs: f32,
}

impl SoundClip {
    pub fn new(name: impl Into<String>, length_secs: f32) -> Self {
        Self {
            name: name.into(),
            length_secs,
        }
    }
}

/// Visual and audio effect played when a pickup or hazard is triggered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Animation clip length. `None` means the entity has no animator.
    pub animation_secs: Option<f32>,
    pub sound: Option<SoundClip>,
}

impl EffectConfig {
    /// Seconds to keep the entity alive after it triggers. `None` means it
    /// deactivates immediately (no animator to wait for).
    pub fn linger_secs(&self) -> Option<f32> {
        let anim = self.animation_secs?;
        let sound = self.sound.as_ref().map_or(0.0, |clip| clip.length_secs);
        Some(anim.max(sound).max(0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    pub max_health: f32,
    pub max_time: f32,
    pub damage_interval_secs: f32,
    pub damage_amount: f32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            max_time: MAX_TIME,
            damage_interval_secs: TIME_DAMAGE_INTERVAL,
            damage_amount: TIME_DAMAGE_AMOUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    pub move_speed: f32,
    pub friction: f32,
    pub smoothing: f32,
    pub deadzone: f32,
    pub max_tilt_deg: f32,
    pub tilt_per_velocity: f32,
    pub wake_rate_per_input: f32,
    pub collider_radius: f32,
    /// Start with the on-screen joystick as the input source.
    pub mobile_controls: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            move_speed: SUB_MOVE_SPEED,
            friction: SUB_FRICTION,
            smoothing: SUB_VELOCITY_SMOOTHING,
            deadzone: SUB_INPUT_DEADZONE,
            max_tilt_deg: SUB_MAX_TILT_DEG,
            tilt_per_velocity: SUB_TILT_PER_VELOCITY,
            wake_rate_per_input: SUB_WAKE_RATE_PER_INPUT,
            collider_radius: SUB_COLLIDER_RADIUS,
            mobile_controls: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub total_fish_needed: u32,
    /// Bar colour at a full bar.
    pub max_color: Rgba,
    /// Bar colour at an empty bar.
    pub min_color: Rgba,
    pub volume: f32,
    pub win_sound: Option<SoundClip>,
    pub game_over_sound: Option<SoundClip>,
    pub warning_sound: Option<SoundClip>,
    /// Background loop that runs for as long as a round is on screen.
    pub ambient_sound: Option<SoundClip>,
    /// Scene has an on-screen joystick.
    pub has_joystick: bool,
    /// Scene has a warning image.
    pub has_warning_image: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            total_fish_needed: TOTAL_FISH_NEEDED,
            max_color: Rgba::GREEN,
            min_color: Rgba::RED,
            volume: DEFAULT_VOLUME,
            win_sound: Some(SoundClip::new("win", 2.0)),
            game_over_sound: Some(SoundClip::new("game_over", 2.0)),
            warning_sound: Some(SoundClip::new("warning", 1.0)),
            ambient_sound: Some(SoundClip::new("ambient", 60.0)),
            has_joystick: true,
            has_warning_image: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MineConfig {
    pub damage: f32,
    pub time_penalty: f32,
    pub spawn_interval: Span,
    pub fall_speed: Span,
    pub oscillation: Span,
    pub oscillation_speed: Span,
    pub kill_plane_y: f32,
    pub pool_size: usize,
    pub collider_radius: f32,
    pub explosion: EffectConfig,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            damage: MINE_DAMAGE,
            time_penalty: 0.0,
            spawn_interval: Span::new(MINE_SPAWN_MIN_SECS, MINE_SPAWN_MAX_SECS),
            fall_speed: Span::new(MINE_FALL_SPEED_MIN, MINE_FALL_SPEED_MAX),
            oscillation: Span::new(MINE_OSCILLATION_MIN, MINE_OSCILLATION_MAX),
            oscillation_speed: Span::new(MINE_OSCILLATION_SPEED_MIN, MINE_OSCILLATION_SPEED_MAX),
            kill_plane_y: MINE_KILL_PLANE_Y,
            pool_size: MINE_POOL_SIZE,
            collider_radius: MINE_COLLIDER_RADIUS,
            explosion: EffectConfig {
                animation_secs: Some(DEFAULT_EFFECT_SECS),
                sound: Some(SoundClip::new("explosion", 1.2)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    pub time_bonus: f32,
    pub spawn_interval: Span,
    pub float_speed: f32,
    pub oscillation: f32,
    pub oscillation_speed: f32,
    pub pool_size: usize,
    pub collider_radius: f32,
    pub pop: EffectConfig,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            time_bonus: BUBBLE_TIME_BONUS,
            spawn_interval: Span::new(BUBBLE_SPAWN_MIN_SECS, BUBBLE_SPAWN_MAX_SECS),
            float_speed: BUBBLE_FLOAT_SPEED,
            oscillation: BUBBLE_OSCILLATION,
            oscillation_speed: BUBBLE_OSCILLATION_SPEED,
            pool_size: BUBBLE_POOL_SIZE,
            collider_radius: BUBBLE_COLLIDER_RADIUS,
            pop: EffectConfig {
                animation_secs: Some(DEFAULT_EFFECT_SECS),
                sound: Some(SoundClip::new("pop", 0.3)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    /// Fish placed per level. Raised to the HUD target if lower.
    pub per_level: u32,
    pub swim_speed: f32,
    pub wander_radius: f32,
    pub direction_interval_secs: f32,
    pub direction_jitter_secs: f32,
    pub vertical_bob: f32,
    pub collider_radius: f32,
    pub collect_sound: Option<SoundClip>,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            per_level: TOTAL_FISH_NEEDED + 5,
            swim_speed: FISH_SWIM_SPEED,
            wander_radius: FISH_WANDER_RADIUS,
            direction_interval_secs: FISH_DIRECTION_INTERVAL,
            direction_jitter_secs: FISH_DIRECTION_JITTER,
            vertical_bob: FISH_VERTICAL_BOB,
            collider_radius: FISH_COLLIDER_RADIUS,
            collect_sound: Some(SoundClip::new("collect", 0.4)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub bounds: FieldBounds,
    pub spawn_margin: f32,
    pub spawn_offset: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            bounds: FieldBounds::default(),
            spawn_margin: SPAWN_EDGE_MARGIN,
            spawn_offset: SPAWN_EDGE_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub damping_secs: f32,
    pub offset: Vec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            damping_secs: CAMERA_DAMPING_SECS,
            offset: Vec2::ZERO,
        }
    }
}

/// Complete tuning for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub vitals: VitalsConfig,
    pub pilot: PilotConfig,
    pub hud: HudConfig,
    pub mines: MineConfig,
    pub bubbles: BubbleConfig,
    pub fish: FishConfig,
    pub field: FieldConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str::<GameConfig>(json)?.validated())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Repair values that would otherwise misbehave: inverted ranges, a zero
    /// fish target, out-of-range volume, too few fish to win.
    pub fn validated(mut self) -> Self {
        self.mines.spawn_interval = self.mines.spawn_interval.validated();
        self.mines.fall_speed = self.mines.fall_speed.validated();
        self.mines.oscillation = self.mines.oscillation.validated();
        self.mines.oscillation_speed = self.mines.oscillation_speed.validated();
        self.bubbles.spawn_interval = self.bubbles.spawn_interval.validated();
        self.hud.total_fish_needed = self.hud.total_fish_needed.max(1);
        self.hud.volume = self.hud.volume.clamp(0.0, 1.0);
        self.fish.per_level = self.fish.per_level.max(self.hud.total_fish_needed);
        self
    }
}
