//! Enemy behaviour: drifting toward the cat, noticing when the cat has run
//! past, and colliding with it.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::enemy::Enemy;
use crate::components::runner::Player;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::resources::audio::SoundBank;
use crate::resources::gamestate::{GameOverReason, GameStates, NextGameState};
use crate::resources::rng::GameRng;
use crate::resources::worldtime::WorldTime;
use crate::rules::{collides, enemy_drift_x, enemy_is_behind};

/// Nudge enemies just ahead of the cat toward its lane.
pub fn enemy_drift(
    cat: Query<&WorldPosition, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<&mut WorldPosition, With<Enemy>>,
    time: Res<WorldTime>,
) {
    let Ok(cat) = cat.single() else {
        return;
    };
    for mut position in enemies.iter_mut() {
        position.pos.x = enemy_drift_x(cat.pos, position.pos, time.delta);
    }
}

/// Flag each enemy once when the cat runs past it and play a pass sound.
pub fn enemy_pass_detector(
    cat: Query<&WorldPosition, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<(&mut Enemy, &WorldPosition)>,
    bank: Res<SoundBank>,
    mut rng: ResMut<GameRng>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let Ok(cat) = cat.single() else {
        return;
    };
    let pass_sounds = bank.loaded_pass_sounds();
    for (mut enemy, position) in enemies.iter_mut() {
        if enemy.has_passed || !enemy_is_behind(position.pos.z, cat.pos.z) {
            continue;
        }
        enemy.has_passed = true;
        debug!("Enemy {} passed the cat", enemy.index);
        if let Some(id) = rng.0.choice(pass_sounds.iter()) {
            audio_cmds.write(AudioCmd::PlayFx { id: id.to_string() });
        }
    }
}

/// End the run when the cat touches an enemy, unless the run already ended
/// this frame.
pub fn enemy_collision_check(
    cat: Query<&WorldPosition, (With<Player>, Without<Enemy>)>,
    enemies: Query<(&Enemy, &WorldPosition)>,
    mut next_state: ResMut<NextGameState>,
) {
    if next_state.is_pending() {
        return;
    }
    let Ok(cat) = cat.single() else {
        return;
    };
    if let Some((enemy, _)) = enemies
        .iter()
        .find(|(_, position)| collides(cat.pos, position.pos))
    {
        info!("Cat ran into enemy {}", enemy.index);
        next_state.set(GameStates::GameOver(GameOverReason::EnemyCollision));
    }
}
