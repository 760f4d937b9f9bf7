//! ECS systems that operate on the simulation world.
//!
//! Systems are plain functions over `&mut World` (or `&World` when they only
//! read). Session state such as the vitals or the HUD is passed in by the
//! engine.

pub mod camera;
pub mod cleanup;
pub mod contact;
pub mod drift;
pub mod expiry;
pub mod fish;
pub mod pilot;
pub mod snapshot;
pub mod spawner;
