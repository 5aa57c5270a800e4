//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies the window settings to
//! the running game. The file itself is read in `main` before the window
//! opens, so the first run of this system applies the loaded values.

use crate::resources::gameconfig::GameConfig;
use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi;

/// System that applies game configuration changes.
///
/// When [`GameConfig`] is added or modified: syncs fullscreen, vsync and the
/// target frame rate with the window.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !(config.is_changed() || config.is_added()) {
        return;
    }

    if config.fullscreen != rl.is_window_fullscreen() {
        info!(
            "Fullscreen mismatch: config={}, window={} - toggling",
            config.fullscreen,
            rl.is_window_fullscreen()
        );
        rl.toggle_fullscreen();
    }

    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }

    rl.set_target_fps(config.target_fps);

    info!(
        "GameConfig applied: fps={}, vsync={}, fullscreen={}",
        config.target_fps, config.vsync, config.fullscreen
    );
}
