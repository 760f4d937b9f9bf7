//! Headless Aqua Nautic runner.
//!
//! Wires the simulation onto a game loop thread and exposes a small control
//! surface (start, send command, poll snapshot, stop) plus a simple autopilot
//! that plays the game for demos and soak runs.

pub mod autopilot;
pub mod cli;
pub mod control;
pub mod game_loop;
pub mod state;

pub use nautic_core as core;
