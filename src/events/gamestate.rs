//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the enter hook stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! This decouples the intent to change state from the mechanics of running
//! the hooks and avoids borrowing conflicts.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs the enter hook and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// The enter hooks are looked up in [`SystemsStore`] under the keys
/// `"setup"`, `"enter_play"`, `"enter_game_over"` and `"enter_win"`. A
/// missing resource or hook is logged and skipped.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Option<Res<SystemsStore>>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    // Clone first so no borrow of next_game_state is held while mutating it.
    let next_state_value = next_game_state.get().clone();
    match next_state_value {
        Pending(new_state) => {
            info!(
                "Transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            game_state.set(new_state.clone());
            next_game_state.reset();
            match systems_store.as_deref() {
                Some(store) => on_state_enter(&new_state, &mut commands, store),
                None => warn!("SystemsStore missing, no enter hook run for {:?}", new_state),
            }
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Name of the hook run when `state` is entered, if it has one.
pub fn enter_hook_name(state: &GameStates) -> Option<&'static str> {
    match state {
        GameStates::None => None,
        GameStates::Setup => Some("setup"),
        GameStates::Playing => Some("enter_play"),
        GameStates::GameOver(_) => Some("enter_game_over"),
        GameStates::Won => Some("enter_win"),
    }
}

fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let Some(hook) = enter_hook_name(state) else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(*id),
        None => warn!("Hook '{}' not found in SystemsStore", hook),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gamestate::GameOverReason;

    #[test]
    fn every_run_state_has_a_hook() {
        assert_eq!(enter_hook_name(&GameStates::None), None);
        assert_eq!(enter_hook_name(&GameStates::Setup), Some("setup"));
        assert_eq!(enter_hook_name(&GameStates::Playing), Some("enter_play"));
        assert_eq!(
            enter_hook_name(&GameStates::GameOver(GameOverReason::OffPath)),
            Some("enter_game_over")
        );
        assert_eq!(enter_hook_name(&GameStates::Won), Some("enter_win"));
    }
}
