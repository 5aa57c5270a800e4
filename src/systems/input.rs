//! Input systems.
//!
//! - [`update_input_state`] reads the keyboard and the mouse (touches arrive
//!   as mouse presses) from Raylib each frame and writes the results into
//!   [`InputState`].
//! - Logical [`InputEvent`]s are triggered when a steering intent starts or
//!   stops and when restart is pressed; F11 triggers [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;
use raylib::prelude::{KeyboardKey, MouseButton, Rectangle, Vector2};

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;
use crate::resources::windowsize::{HudLayout, WindowSize, contains};

/// Feed one frame of raw input into `input` and return the logical events it
/// produced.
///
/// `is_key_down` reports keyboard state; `pointer` is the position of a held
/// mouse button or touch, if any.
pub fn refresh_input(
    input: &mut InputState,
    is_key_down: impl Fn(KeyboardKey) -> bool,
    pointer: Option<Vector2>,
    hud: &HudLayout,
) -> Vec<InputEvent> {
    let was_left = input.wants_left();
    let was_right = input.wants_right();

    for state in [
        &mut input.steer_left,
        &mut input.steer_left_alt,
        &mut input.steer_right,
        &mut input.steer_right_alt,
        &mut input.restart,
        &mut input.restart_alt,
        &mut input.mode_debug,
    ] {
        let down = is_key_down(state.key_binding);
        state.update(down);
    }

    let over = |rect: &Rectangle| pointer.is_some_and(|p| contains(rect, p));
    input.pointer_left.update(over(&hud.left));
    input.pointer_right.update(over(&hud.right));
    input.pointer_restart.update(over(&hud.restart));

    let mut events = Vec::new();
    for (action, was, now) in [
        (InputAction::SteerLeft, was_left, input.wants_left()),
        (InputAction::SteerRight, was_right, input.wants_right()),
    ] {
        if was != now {
            events.push(InputEvent {
                action,
                pressed: now,
            });
        }
    }
    if input.restart_requested() {
        events.push(InputEvent {
            action: InputAction::Restart,
            pressed: true,
        });
    }
    events
}

/// Poll Raylib for input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    window_size: Res<WindowSize>,
    mut commands: Commands,
) {
    let pointer = rl
        .is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT)
        .then(|| rl.get_mouse_position());
    let hud = window_size.hud_layout();

    let events = refresh_input(&mut input, |key| rl.is_key_down(key), pointer, &hud);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    for event in events {
        commands.trigger(event);
    }
}
