use bevy_ecs::prelude::Component;

/// Playback state of a sprite-sheet clip from the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Start part-way through the clip, so a crowd does not walk in lockstep.
    pub fn with_phase(mut self, frame_index: usize, elapsed_time: f32) -> Self {
        self.frame_index = frame_index;
        self.elapsed_time = elapsed_time;
        self
    }
}
