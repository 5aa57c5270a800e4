use bevy_ecs::prelude::Component;

/// An obstacle on the path.
///
/// `has_passed` flips to true once, the first frame the cat is past it, and
/// is never cleared during a session.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Enemy {
    pub index: usize,
    pub has_passed: bool,
}

impl Enemy {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            has_passed: false,
        }
    }
}
