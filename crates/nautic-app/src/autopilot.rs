//! Autopilot: reads a snapshot and steers toward the nearest visible fish,
//! veering away from mines that get too close.

use glam::Vec2;

use nautic_core::commands::PlayerCommand;
use nautic_core::enums::{GamePhase, InputSource};
use nautic_core::state::GameStateSnapshot;

/// Mines closer than this push the submarine away.
const MINE_AVOID_RADIUS: f32 = 2.5;

/// Input magnitude the autopilot steers with.
const CRUISE_INPUT: f32 = 1.0;

/// Stick direction toward the closest fish, bent away from nearby mines.
/// Zero when there is nothing to chase.
pub fn steer(snapshot: &GameStateSnapshot) -> Vec2 {
    let sub = snapshot.submarine.position;

    let chase = snapshot
        .fish
        .iter()
        .filter(|fish| fish.visible)
        .map(|fish| fish.position - sub)
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .map(Vec2::normalize_or_zero)
        .unwrap_or(Vec2::ZERO);

    let avoid: Vec2 = snapshot
        .mines
        .iter()
        .filter(|mine| !mine.triggered)
        .filter_map(|mine| {
            let away = sub - mine.position;
            let distance = away.length();
            (distance < MINE_AVOID_RADIUS).then(|| {
                // Stronger the closer the mine.
                away.normalize_or_zero() * (1.0 - distance / MINE_AVOID_RADIUS) * 2.0
            })
        })
        .sum();

    (chase + avoid).clamp_length_max(1.0) * CRUISE_INPUT
}

/// The input command for this snapshot, or `None` once the round is not
/// being played.
pub fn next_command(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    if snapshot.phase != GamePhase::Playing {
        return None;
    }
    let input = steer(snapshot);
    Some(PlayerCommand::SetInput {
        source: InputSource::Axes,
        x: input.x,
        y: input.y,
    })
}
