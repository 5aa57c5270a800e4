use bevy_ecs::prelude::*;

use crate::components::surface::TextureScroll;
use crate::resources::worldtime::WorldTime;

/// Move the ground and lava textures.
pub fn scroll_textures(mut query: Query<&mut TextureScroll>, time: Res<WorldTime>) {
    for mut scroll in query.iter_mut() {
        scroll.advance(time.delta);
    }
}
