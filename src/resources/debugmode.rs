//! Debug toggle resource.
//!
//! The mere presence of this resource turns on the debug overlay: frame rate,
//! cat position, game state, passed enemies and collision spheres. Remove it
//! to hide the overlay again.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
