//! Simulation engine for Aqua Nautic.
//!
//! Owns the hecs ECS world, runs the frame and physics systems, and produces
//! GameStateSnapshots for the host.

pub mod engine;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use nautic_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
