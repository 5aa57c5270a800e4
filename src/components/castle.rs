use bevy_ecs::prelude::Component;

/// The goal at the end of the path. Reaching its win buffer ends the run.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Castle;
