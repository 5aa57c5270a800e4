use bevy_ecs::prelude::*;

use crate::resources::flash::BackgroundFlash;
use crate::resources::worldtime::WorldTime;

/// Count down the game-over background flash.
pub fn background_flash_system(mut flash: ResMut<BackgroundFlash>, time: Res<WorldTime>) {
    flash.tick(time.delta);
}
