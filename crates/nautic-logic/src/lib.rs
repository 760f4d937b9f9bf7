//! Gameplay rules for Aqua Nautic.
//!
//! State machines for the submarine vitals, the HUD coordinator and the
//! movement controller. Plain data in, plain data out; the simulation crate
//! wires them into the ECS world.

pub mod hud;
pub mod pilot;
pub mod vitals;

pub use nautic_core as core;
