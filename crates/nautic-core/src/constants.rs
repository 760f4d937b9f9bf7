//! Simulation constants and tuning parameters.
//!
//! These are the defaults behind [`crate::config::GameConfig`]; a loaded
//! config can override any of them.

/// Physics tick rate (Hz).
pub const FIXED_TICK_RATE: u32 = 50;

/// Seconds per physics tick.
pub const FIXED_DT: f32 = 1.0 / FIXED_TICK_RATE as f32;

/// Nominal frame rate used by the headless runner (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Vitals ---

pub const MAX_HEALTH: f32 = 100.0;

/// Round length in seconds before the clock runs out.
pub const MAX_TIME: f32 = 60.0;

/// Seconds of expired time between two time-out damage events.
pub const TIME_DAMAGE_INTERVAL: f32 = 1.0;

/// Health lost per time-out damage event.
pub const TIME_DAMAGE_AMOUNT: f32 = 5.0;

// --- Submarine ---

pub const SUB_MOVE_SPEED: f32 = 5.0;

/// Per-tick velocity multiplier when there is no input.
pub const SUB_FRICTION: f32 = 0.95;

/// Lerp factor toward the target velocity each physics tick.
pub const SUB_VELOCITY_SMOOTHING: f32 = 0.1;

/// Input magnitude below which the stick counts as centred.
pub const SUB_INPUT_DEADZONE: f32 = 0.1;

/// Maximum nose tilt in degrees, either direction.
pub const SUB_MAX_TILT_DEG: f32 = 45.0;

/// Degrees of tilt per unit of vertical velocity.
pub const SUB_TILT_PER_VELOCITY: f32 = 3.0;

/// Wake particles per second per unit of input magnitude.
pub const SUB_WAKE_RATE_PER_INPUT: f32 = 10.0;

pub const SUB_COLLIDER_RADIUS: f32 = 0.6;

// --- Mines ---

pub const MINE_DAMAGE: f32 = 20.0;
pub const MINE_SPAWN_MIN_SECS: f32 = 3.0;
pub const MINE_SPAWN_MAX_SECS: f32 = 8.0;
pub const MINE_FALL_SPEED_MIN: f32 = 1.5;
pub const MINE_FALL_SPEED_MAX: f32 = 3.0;
pub const MINE_OSCILLATION_MIN: f32 = 0.3;
pub const MINE_OSCILLATION_MAX: f32 = 0.8;
pub const MINE_OSCILLATION_SPEED_MIN: f32 = 1.5;
pub const MINE_OSCILLATION_SPEED_MAX: f32 = 2.5;

/// Mines below this height go back to the pool.
pub const MINE_KILL_PLANE_Y: f32 = -10.0;

pub const MINE_POOL_SIZE: usize = 10;
pub const MINE_COLLIDER_RADIUS: f32 = 0.5;

// --- Bubbles ---

pub const BUBBLE_TIME_BONUS: f32 = 5.0;
pub const BUBBLE_SPAWN_MIN_SECS: f32 = 3.0;
pub const BUBBLE_SPAWN_MAX_SECS: f32 = 8.0;
pub const BUBBLE_FLOAT_SPEED: f32 = 1.0;
pub const BUBBLE_OSCILLATION: f32 = 0.5;
pub const BUBBLE_OSCILLATION_SPEED: f32 = 2.0;
pub const BUBBLE_POOL_SIZE: usize = 10;
pub const BUBBLE_COLLIDER_RADIUS: f32 = 0.4;

// --- Fish ---

pub const FISH_SWIM_SPEED: f32 = 2.0;
pub const FISH_WANDER_RADIUS: f32 = 3.0;
pub const FISH_DIRECTION_INTERVAL: f32 = 2.0;

/// Random jitter applied to the direction interval, either side.
pub const FISH_DIRECTION_JITTER: f32 = 0.5;
pub const FISH_VERTICAL_BOB: f32 = 1.0;

/// Distance at which a fish counts as having reached its wander target.
pub const FISH_ARRIVE_DISTANCE: f32 = 0.1;
pub const FISH_COLLIDER_RADIUS: f32 = 0.4;

/// Fish the player must collect to win a level.
pub const TOTAL_FISH_NEEDED: u32 = 20;

// --- Play field ---

pub const FIELD_WIDTH: f32 = 36.0;
pub const FIELD_HEIGHT: f32 = 20.0;

/// Inset from the left/right field edges for spawn positions.
pub const SPAWN_EDGE_MARGIN: f32 = 1.0;

/// Offset beyond the top/bottom edge for spawn lines and despawn bounds.
pub const SPAWN_EDGE_OFFSET: f32 = 1.0;

// --- Effects ---

/// Fallback effect length when an animation clip length is unknown.
pub const DEFAULT_EFFECT_SECS: f32 = 0.5;

pub const DEFAULT_VOLUME: f32 = 0.5;

// --- Camera ---

pub const CAMERA_DAMPING_SECS: f32 = 0.15;
