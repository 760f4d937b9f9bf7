//! Drift system: mines sink and bubbles rise, both swaying around their
//! anchor line. Triggered instances hold still while their effect plays.

use hecs::World;

use nautic_core::components::{AirPocket, Drift, MineCharge, Pooled, Position};

pub fn run(world: &mut World, elapsed: f32, dt: f32) {
    for (_entity, (pos, drift, pooled, charge, pocket)) in world.query_mut::<(
        &mut Position,
        &Drift,
        &Pooled,
        Option<&MineCharge>,
        Option<&AirPocket>,
    )>() {
        let triggered = charge.is_some_and(|c| c.triggered) || pocket.is_some_and(|p| p.triggered);
        if !pooled.active || triggered {
            continue;
        }
        pos.0.y += drift.vertical_speed * dt;
        pos.0.x = drift.anchor_x
            + ((elapsed + drift.phase_offset) * drift.sway_speed).sin() * drift.sway_amount;
    }
}
