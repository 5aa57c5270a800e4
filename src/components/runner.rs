//! The player-controlled runner.

use bevy_ecs::prelude::Component;

use crate::rules::{CAT_FORWARD_SPEED, CAT_SCALE, standing_height};

/// Marker for the cat. Exactly one entity carries it.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Forward motion of the cat. Steering speed comes from the input intents.
///
/// `ground_y` is the height the body is pinned to while running.
#[derive(Component, Clone, Copy, Debug)]
pub struct Runner {
    pub forward_speed: f32,
    pub ground_y: f32,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            forward_speed: CAT_FORWARD_SPEED,
            ground_y: standing_height(CAT_SCALE),
        }
    }
}
