use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// A falling confetti particle spawned on a win. Its colour is the entity's
/// [`Tint`](crate::components::tint::Tint).
#[derive(Component, Clone, Copy, Debug)]
pub struct Confetti {
    pub velocity: Vector3,
}
