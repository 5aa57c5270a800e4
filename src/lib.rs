//! Lava Cat library.
//!
//! Exposes the game's ECS components, resources, systems and events, plus the
//! pure gameplay rules, for use by the binary and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod rules;
pub mod systems;
