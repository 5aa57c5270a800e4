//! Cat movement and the two checks that end a run from the cat's position.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::castle::Castle;
use crate::components::runner::{Player, Runner};
use crate::components::worldposition::WorldPosition;
use crate::resources::gamestate::{GameOverReason, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::rules::{PATH_WIDTH, integrate_runner, is_off_path, lateral_velocity, reached_castle};

/// Run the cat forward and steer it from the input intents.
pub fn runner_movement(
    mut query: Query<(&mut WorldPosition, &Runner), With<Player>>,
    input: Res<InputState>,
    time: Res<WorldTime>,
) {
    let lateral = lateral_velocity(input.wants_left(), input.wants_right());
    for (mut position, runner) in query.iter_mut() {
        position.pos = integrate_runner(
            position.pos,
            runner.forward_speed,
            lateral,
            runner.ground_y,
            time.delta,
        );
    }
}

/// Win as soon as the cat is within the castle's buffer.
pub fn castle_reached_check(
    cat: Query<&WorldPosition, With<Player>>,
    castle: Query<&WorldPosition, With<Castle>>,
    mut next_state: ResMut<NextGameState>,
) {
    let (Ok(cat), Ok(castle)) = (cat.single(), castle.single()) else {
        return;
    };
    if reached_castle(cat.pos.z, castle.pos.z) {
        info!("Cat reached the castle at z={:.2}", cat.pos.z);
        next_state.set(GameStates::Won);
    }
}

/// Lose when the cat leaves the path.
pub fn off_path_check(cat: Query<&WorldPosition, With<Player>>, mut next_state: ResMut<NextGameState>) {
    let Ok(cat) = cat.single() else {
        return;
    };
    if !next_state.is_pending() && is_off_path(cat.pos.x, PATH_WIDTH) {
        info!("Cat fell off the path at x={:.2}", cat.pos.x);
        next_state.set(GameStates::GameOver(GameOverReason::OffPath));
    }
}
