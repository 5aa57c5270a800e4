//! Animation clip registry.
//!
//! Clips describe how a sprite sheet is played: how many cells, how fast and
//! whether it loops. The cat and every enemy share the `"walk"` clip; each
//! entity keeps its own playback state in
//! [`Animation`](crate::components::animation::Animation).

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::rules::{ANIM_FPS, ANIM_FRAME_COUNT};

pub const WALK: &str = "walk";

/// Central registry of reusable animation clips keyed by string IDs.
#[derive(Resource, Debug, Clone)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable playback parameters of a sprite-sheet clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Number of frames in the clip.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the clip restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    pub fn frame_time(&self) -> f32 {
        if self.fps > 0.0 { 1.0 / self.fps } else { f32::INFINITY }
    }
}

impl Default for AnimationStore {
    fn default() -> Self {
        let mut animations = FxHashMap::default();
        animations.insert(
            WALK.to_string(),
            AnimationResource {
                frame_count: ANIM_FRAME_COUNT,
                fps: ANIM_FPS,
                looped: true,
            },
        );
        AnimationStore { animations }
    }
}

impl AnimationStore {
    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }
}
