use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Centre of an entity in the 3D scene.
#[derive(Component, Clone, Copy, Debug)]
pub struct WorldPosition {
    pub pos: Vector3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }
}
