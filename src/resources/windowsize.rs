//! Window size resource and HUD layout.
//!
//! Tracks the actual window dimensions in pixels. Updated each frame so the
//! on-screen buttons and messages follow window resizes.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

/// Screen rectangles of the HUD buttons for a given window size.
#[derive(Debug, Clone, Copy)]
pub struct HudLayout {
    pub left: Rectangle,
    pub right: Rectangle,
    pub restart: Rectangle,
}

impl WindowSize {
    /// Button placement: steering buttons in the bottom corners, restart
    /// centred below the end-of-run message.
    pub fn hud_layout(&self) -> HudLayout {
        let w = self.w.max(1) as f32;
        let h = self.h.max(1) as f32;
        let side = (w.min(h) * 0.15).max(48.0);
        let margin = side * 0.25;

        let restart_w = side * 2.5;
        let restart_h = side * 0.7;

        HudLayout {
            left: Rectangle {
                x: margin,
                y: h - side - margin,
                width: side,
                height: side,
            },
            right: Rectangle {
                x: w - side - margin,
                y: h - side - margin,
                width: side,
                height: side,
            },
            restart: Rectangle {
                x: (w - restart_w) / 2.0,
                y: h * 0.55,
                width: restart_w,
                height: restart_h,
            },
        }
    }
}

/// Point-in-rectangle test with inclusive edges.
pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}
