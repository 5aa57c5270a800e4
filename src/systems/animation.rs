//! Sprite-sheet animation system.
//!
//! Every [`Animation`] advances through its clip from the
//! [`AnimationStore`]; the renderer turns the frame index into a cell of the
//! entity's [`Billboard`](crate::components::billboard::Billboard) sheet.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;
use crate::rules::tick_frame_timer;

/// Advance animation timers by the frame delta, at most one frame per tick.
pub fn animate_sprites(
    mut query: Query<&mut Animation>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for mut anim in query.iter_mut() {
        let Some(clip) = animation_store.get(&anim.animation_key) else {
            warn!("Unknown animation '{}'", anim.animation_key);
            continue;
        };
        let anim = &mut *anim;
        tick_frame_timer(
            &mut anim.elapsed_time,
            &mut anim.frame_index,
            time.delta,
            clip.frame_time(),
            clip.frame_count,
            clip.looped,
        );
    }
}
