//! Flat scenery: the path strip, the lava planes and the path borders.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2, Vector3};

/// A horizontal textured plane centred on the entity's position.
///
/// `size` is the extent along X and Z; `repeat` is how many times the
/// texture tiles across it. Without a loaded texture the plane is filled
/// with `fallback`.
#[derive(Component, Clone, Debug)]
pub struct Surface {
    pub tex_key: String,
    pub size: Vector2,
    pub repeat: Vector2,
    pub fallback: Color,
}

/// Texture offset that moves at a constant rate, wrapping at 1.0.
#[derive(Component, Clone, Copy, Debug)]
pub struct TextureScroll {
    pub velocity: Vector2,
    pub offset: Vector2,
}

impl TextureScroll {
    pub fn new(velocity: Vector2) -> Self {
        Self {
            velocity,
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.offset.x = (self.offset.x + self.velocity.x * dt).rem_euclid(1.0);
        self.offset.y = (self.offset.y + self.velocity.y * dt).rem_euclid(1.0);
    }
}

/// An untextured box, used for the path borders.
#[derive(Component, Clone, Copy, Debug)]
pub struct SolidBox {
    pub size: Vector3,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_wraps_into_unit_range() {
        let mut scroll = TextureScroll::new(Vector2 { x: 0.5, y: -0.5 });
        scroll.advance(3.0);
        assert!(scroll.offset.x >= 0.0 && scroll.offset.x < 1.0);
        assert!(scroll.offset.y >= 0.0 && scroll.offset.y < 1.0);
        assert!((scroll.offset.x - 0.5).abs() < 1e-5);
        assert!((scroll.offset.y - 0.5).abs() < 1e-5);
    }
}
