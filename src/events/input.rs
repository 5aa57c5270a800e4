//! Input action events.
//!
//! [`InputEvent`] is triggered by
//! [`update_input_state`](crate::systems::input::update_input_state) when a
//! gameplay-relevant action is pressed or released, whichever key or
//! on-screen button caused it. The observers here react to the presses that
//! change more than the cat's velocity: restarting a finished run and
//! starting the music on the first steer.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::audio::AudioCmd;
use crate::resources::audio::{MUSIC, SoundBank};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Left arrow, A, or the left on-screen button.
    SteerLeft,
    /// Right arrow, D, or the right on-screen button.
    SteerRight,
    /// Enter, R, or the restart button.
    Restart,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

/// Request a new run when restart is pressed after a run has ended.
///
/// Ignored while playing and while another transition is pending.
pub fn restart_observer(
    trigger: On<InputEvent>,
    game_state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    if event.action != InputAction::Restart || !event.pressed {
        return;
    }
    if !game_state.get().is_terminal() || next_state.is_pending() {
        debug!("Restart ignored in {:?}", game_state.get());
        return;
    }
    info!("Restart requested");
    next_state.set(GameStates::Playing);
}

/// Start the background music on the first steering press of a run.
///
/// Only when the music loaded, is not already playing and the run is live.
pub fn music_start_observer(
    trigger: On<InputEvent>,
    game_state: Res<GameState>,
    mut bank: ResMut<SoundBank>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    if !event.pressed || event.action == InputAction::Restart {
        return;
    }
    if *game_state.get() != GameStates::Playing || bank.music_playing || !bank.has_music(MUSIC) {
        return;
    }
    audio_cmds.write(AudioCmd::PlayMusic {
        id: MUSIC.to_string(),
        looped: true,
    });
    bank.music_playing = true;
}
