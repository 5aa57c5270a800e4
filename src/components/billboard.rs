//! Camera-facing sprite drawn from a sprite-sheet grid.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::rules::frame_cell;

/// A textured quad that always faces the camera.
///
/// The sheet is split into `columns` x `rows` equal cells; the visible cell
/// comes from the entity's [`Animation`](crate::components::animation::Animation)
/// if it has one, otherwise cell 0. When `tex_key` is missing from the
/// [`TextureStore`](crate::resources::texturestore::TextureStore) the body is
/// drawn as a `fallback` coloured cube instead.
#[derive(Component, Clone, Debug)]
pub struct Billboard {
    pub tex_key: String,
    pub size: Vector2,
    pub columns: usize,
    pub rows: usize,
    pub fallback: Color,
}

impl Billboard {
    pub fn new(tex_key: impl Into<String>, size: Vector2, fallback: Color) -> Self {
        Self {
            tex_key: tex_key.into(),
            size,
            columns: 1,
            rows: 1,
            fallback,
        }
    }

    pub fn with_grid(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns.max(1);
        self.rows = rows.max(1);
        self
    }

    /// Source rectangle of `frame` on a texture of the given pixel size.
    pub fn source_rect(&self, frame: usize, tex_width: f32, tex_height: f32) -> Rectangle {
        let cell_w = tex_width / self.columns as f32;
        let cell_h = tex_height / self.rows as f32;
        let (col, row) = frame_cell(frame % (self.columns * self.rows), self.columns);
        Rectangle {
            x: col as f32 * cell_w,
            y: row as f32 * cell_h,
            width: cell_w,
            height: cell_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Billboard {
        Billboard::new("cat", Vector2 { x: 1.5, y: 1.5 }, Color::ORANGE).with_grid(2, 2)
    }

    #[test]
    fn frames_walk_the_grid_row_major() {
        let b = sheet();
        let r0 = b.source_rect(0, 256.0, 256.0);
        let r1 = b.source_rect(1, 256.0, 256.0);
        let r2 = b.source_rect(2, 256.0, 256.0);
        let r3 = b.source_rect(3, 256.0, 256.0);
        assert_eq!((r0.x, r0.y), (0.0, 0.0));
        assert_eq!((r1.x, r1.y), (128.0, 0.0));
        assert_eq!((r2.x, r2.y), (0.0, 128.0));
        assert_eq!((r3.x, r3.y), (128.0, 128.0));
        assert_eq!((r3.width, r3.height), (128.0, 128.0));
    }

    #[test]
    fn out_of_range_frame_wraps() {
        let b = sheet();
        let wrapped = b.source_rect(5, 256.0, 256.0);
        let direct = b.source_rect(1, 256.0, 256.0);
        assert_eq!((wrapped.x, wrapped.y), (direct.x, direct.y));
    }

    #[test]
    fn single_cell_uses_whole_texture() {
        let b = Billboard::new("castle", Vector2 { x: 10.0, y: 10.0 }, Color::GRAY);
        let r = b.source_rect(0, 64.0, 32.0);
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 64.0, 32.0));
    }
}
