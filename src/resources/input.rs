//! Per-frame input resource.
//!
//! Captures the keys and on-screen buttons the game cares about and exposes
//! them to systems via the [`InputState`] resource. Steering has two key
//! bindings per side (arrows and A/D) plus the on-screen buttons, which are
//! held with the mouse or a touch.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action. `KEY_NULL` for on-screen buttons.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Feed this frame's raw state; `just_pressed` is set on the rising edge.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.active = down;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub steer_left: BoolState,
    pub steer_left_alt: BoolState,
    pub steer_right: BoolState,
    pub steer_right_alt: BoolState,
    pub restart: BoolState,
    pub restart_alt: BoolState,
    pub mode_debug: BoolState,
    // On-screen buttons
    pub pointer_left: BoolState,
    pub pointer_right: BoolState,
    pub pointer_restart: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            steer_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            steer_left_alt: BoolState::bound_to(KeyboardKey::KEY_A),
            steer_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            steer_right_alt: BoolState::bound_to(KeyboardKey::KEY_D),
            restart: BoolState::bound_to(KeyboardKey::KEY_ENTER),
            restart_alt: BoolState::bound_to(KeyboardKey::KEY_R),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            pointer_left: BoolState::default(),
            pointer_right: BoolState::default(),
            pointer_restart: BoolState::default(),
        }
    }
}

impl InputState {
    /// Left steering intent from any source.
    pub fn wants_left(&self) -> bool {
        self.steer_left.active || self.steer_left_alt.active || self.pointer_left.active
    }

    /// Right steering intent from any source.
    pub fn wants_right(&self) -> bool {
        self.steer_right.active || self.steer_right_alt.active || self.pointer_right.active
    }

    /// A restart was asked for this frame.
    pub fn restart_requested(&self) -> bool {
        self.restart.just_pressed || self.restart_alt.just_pressed || self.pointer_restart.just_pressed
    }
}
