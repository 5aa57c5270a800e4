//! Colour modulation for billboards and confetti.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Colour tint component for rendering modulation.
///
/// On a [`Billboard`](crate::components::billboard::Billboard) it is the draw
/// tint of the texture; on confetti it is the particle colour.
#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// Opaque colour from HSL, each component in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = hue.rem_euclid(1.0) * 6.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b), 255)
    }

    /// Bright confetti colour with a random hue.
    pub fn random_confetti(rng: &mut fastrand::Rng) -> Self {
        Self::from_hsl(rng.f32(), 0.8, 0.6)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}
