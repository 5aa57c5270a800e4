//! Scene setup and the state hooks of a run.
//!
//! The hooks are plain systems registered in
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the game state observer when a state is entered:
//! - `setup` spawns the scene, queues the audio loads and starts playing
//! - `enter_play` resets the cat, the camera and the confetti for a new run
//! - `enter_game_over` plays the loss sound and flashes the background
//! - `enter_win` plays the fanfare and throws confetti
//!
//! [`add_gameplay_systems`] builds the per-frame order of the run.

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;

use crate::components::animation::Animation;
use crate::components::billboard::Billboard;
use crate::components::castle::Castle;
use crate::components::confetti::Confetti;
use crate::components::enemy::Enemy;
use crate::components::runner::{Player, Runner};
use crate::components::surface::{SolidBox, Surface, TextureScroll};
use crate::components::tint::Tint;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::input::{music_start_observer, restart_observer};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::animationstore::{AnimationStore, WALK};
use crate::resources::audio::{FX_COLLISION, FX_FANFARE, FX_LAVA_FALL, FX_PASS, MUSIC, SoundBank};
use crate::resources::camera::FollowCamera;
use crate::resources::flash::BackgroundFlash;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameOverReason, GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::rng::GameRng;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;
use crate::rules::*;
use crate::systems::animation::animate_sprites;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, track_loaded_sounds, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::camera::camera_follow;
use crate::systems::confetti::confetti_system;
use crate::systems::enemy::{enemy_collision_check, enemy_drift, enemy_pass_detector};
use crate::systems::flash::background_flash_system;
use crate::systems::gamestate::{check_pending_state, state_is_playing, win_not_pending};
use crate::systems::runner::{castle_reached_check, off_path_check, runner_movement};
use crate::systems::scroll::scroll_textures;

pub const TEX_GROUND: &str = "ground";
pub const TEX_LAVA: &str = "lava";
pub const TEX_CAT: &str = "cat";
pub const TEX_CASTLE: &str = "castle";
pub const TEX_ENEMY: &str = "enemy";

const CAT_FALLBACK: Color = Color::new(255, 140, 0, 255);
const ENEMY_FALLBACK: Color = Color::new(128, 0, 128, 255);
const CASTLE_FALLBACK: Color = Color::new(160, 160, 170, 255);
const GROUND_FALLBACK: Color = Color::new(194, 178, 128, 255);
const LAVA_FALLBACK: Color = Color::new(207, 16, 32, 255);

/// (texture key, file name, repeat-wrapped)
const TEXTURE_FILES: [(&str, &str, bool); 5] = [
    (TEX_GROUND, "camino.png", true),
    (TEX_LAVA, "lava.png", true),
    (TEX_CAT, "cat.png", false),
    (TEX_CASTLE, "castillo.png", false),
    (TEX_ENEMY, "enemy.png", false),
];

/// Resources every world needs, window or not.
pub fn insert_core_resources(world: &mut World, seed: Option<u64>) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(InputState::default());
    world.insert_resource(AnimationStore::default());
    world.insert_resource(FollowCamera::default());
    world.insert_resource(BackgroundFlash::default());
    world.insert_resource(GameRng::new(seed));
    if !world.contains_resource::<GameConfig>() {
        world.insert_resource(GameConfig::default());
    }
}

/// Register the state hooks under their well-known names.
pub fn register_state_hooks(world: &mut World) {
    let mut systems_store = SystemsStore::new();
    systems_store.insert("setup", world.register_system(setup));
    systems_store.insert("enter_play", world.register_system(enter_play));
    systems_store.insert("enter_game_over", world.register_system(enter_game_over));
    systems_store.insert("enter_win", world.register_system(enter_win));
    world.insert_resource(systems_store);
}

/// Register the game's observers.
pub fn add_observers(world: &mut World) {
    world.add_observer(observe_gamestate_change_event);
    world.add_observer(switch_debug_observer);
    world.add_observer(restart_observer);
    world.add_observer(music_start_observer);
    world.flush();
}

/// Request the `Setup` state and apply it right away.
pub fn start(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(crate::events::gamestate::GameStateChangedEvent {});
    world.flush();
}

/// Add the per-frame systems, in order.
///
/// While playing: animation, cat movement, win check, then (unless the cat
/// just won) off-path check, texture scroll, enemy drift, pass detection,
/// collision check and camera follow. Confetti and the flash run in every
/// state. Pending transitions are applied next, then audio is exchanged with
/// the audio thread.
pub fn add_gameplay_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            animate_sprites,
            runner_movement,
            castle_reached_check,
            (
                off_path_check,
                scroll_textures,
                enemy_drift,
                enemy_pass_detector,
                enemy_collision_check,
                camera_follow,
            )
                .chain()
                .run_if(win_not_pending),
        )
            .chain()
            .run_if(state_is_playing),
    );
    schedule.add_systems((confetti_system, background_flash_system));
    schedule.add_systems(
        check_pending_state
            .after(camera_follow)
            .after(confetti_system)
            .after(background_flash_system),
    );
    schedule.add_systems(
        (
            forward_audio_cmds,
            update_bevy_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            track_loaded_sounds,
        )
            .chain()
            .after(check_pending_state),
    );
}

/// Load the scene textures from the asset directory.
///
/// A texture that fails to load is logged and left out; its entities are
/// drawn with their fallback colour.
pub fn load_textures(rl: &mut RaylibHandle, th: &RaylibThread, config: &GameConfig) -> TextureStore {
    let mut store = TextureStore::default();
    for (key, file, repeat) in TEXTURE_FILES {
        let path = config.asset_path(file);
        match rl.load_texture(th, &path.to_string_lossy()) {
            Ok(mut texture) => {
                if repeat {
                    texture.set_texture_wrap(th, TextureWrap::TEXTURE_WRAP_REPEAT);
                }
                info!("Loaded texture '{}' from {:?}", key, path);
                store.insert(key, texture);
            }
            Err(e) => error!("Failed to load texture '{}' from {:?}: {}", key, path, e),
        }
    }
    store
}

/// Spawn the cat, the castle, the enemies and the scenery.
pub fn spawn_scene(commands: &mut Commands, rng: &mut fastrand::Rng) {
    let cat = cat_start();
    commands.spawn((
        Player,
        Runner::default(),
        WorldPosition { pos: cat },
        Billboard::new(TEX_CAT, Vector2 { x: CAT_SCALE, y: CAT_SCALE }, CAT_FALLBACK)
            .with_grid(SHEET_COLUMNS, SHEET_ROWS),
        Animation::new(WALK),
    ));

    commands.spawn((
        Castle,
        WorldPosition::new(0.0, standing_height(CASTLE_SCALE), CASTLE_Z),
        Billboard::new(
            TEX_CASTLE,
            Vector2 {
                x: CASTLE_SCALE,
                y: CASTLE_SCALE,
            },
            CASTLE_FALLBACK,
        ),
    ));

    for (index, (x, z)) in enemy_layout(rng, CAT_START_Z, ENEMY_COUNT).into_iter().enumerate() {
        let phase_frame = rng.usize(..ANIM_FRAME_COUNT);
        let phase_time = rng.f32() * frame_time();
        commands.spawn((
            Enemy::new(index),
            WorldPosition::new(x, standing_height(ENEMY_SCALE), z),
            Billboard::new(
                TEX_ENEMY,
                Vector2 {
                    x: ENEMY_SCALE,
                    y: ENEMY_SCALE,
                },
                ENEMY_FALLBACK,
            )
            .with_grid(SHEET_COLUMNS, SHEET_ROWS),
            Animation::new(WALK).with_phase(phase_frame, phase_time),
        ));
    }
    info!("Spawned {} enemies", ENEMY_COUNT);

    commands.spawn((
        WorldPosition::new(0.0, GROUND_Y, 0.0),
        Surface {
            tex_key: TEX_GROUND.to_string(),
            size: Vector2 {
                x: PATH_WIDTH,
                y: LAVA_LENGTH,
            },
            repeat: GROUND_REPEAT,
            fallback: GROUND_FALLBACK,
        },
        TextureScroll::new(Vector2 {
            x: 0.0,
            y: ground_scroll_speed(),
        }),
    ));

    let lava_x = PATH_WIDTH / 2.0 + BORDER_WIDTH + LAVA_WIDTH / 2.0;
    let border_x = PATH_WIDTH / 2.0 + BORDER_WIDTH / 2.0;
    for side in [-1.0, 1.0] {
        commands.spawn((
            WorldPosition::new(side * lava_x, GROUND_Y - LAVA_DROP, 0.0),
            Surface {
                tex_key: TEX_LAVA.to_string(),
                size: Vector2 {
                    x: LAVA_WIDTH,
                    y: LAVA_LENGTH,
                },
                repeat: Vector2 {
                    x: LAVA_WIDTH / 20.0,
                    y: LAVA_LENGTH / 20.0,
                },
                fallback: LAVA_FALLBACK,
            },
            TextureScroll::new(lava_scroll_velocity()),
        ));
        commands.spawn((
            WorldPosition::new(side * border_x, GROUND_Y + BORDER_HEIGHT / 2.0, 0.0),
            SolidBox {
                size: Vector3 {
                    x: BORDER_WIDTH,
                    y: BORDER_HEIGHT,
                    z: LAVA_LENGTH,
                },
                color: BORDER_COLOR,
            },
        ));
    }
}

/// Audio loads for the run, with their volumes.
pub fn audio_load_commands(config: &GameConfig) -> Vec<AudioCmd> {
    let path = |file: &str| config.asset_path(file).to_string_lossy().into_owned();
    let mut cmds = vec![
        AudioCmd::LoadMusic {
            id: MUSIC.to_string(),
            path: path("music.mp3"),
            volume: 0.1,
        },
        AudioCmd::LoadFx {
            id: FX_COLLISION.to_string(),
            path: path("collision.ogg"),
            volume: 0.5,
        },
        AudioCmd::LoadFx {
            id: FX_LAVA_FALL.to_string(),
            path: path("caida_lava2.ogg"),
            volume: 0.6,
        },
        AudioCmd::LoadFx {
            id: FX_FANFARE.to_string(),
            path: path("fanfarria.ogg"),
            volume: 0.7,
        },
    ];
    for (i, id) in FX_PASS.iter().enumerate() {
        cmds.push(AudioCmd::LoadFx {
            id: id.to_string(),
            path: path(&format!("pasada{}.ogg", i + 1)),
            volume: 0.4,
        });
    }
    cmds
}

/// Setup hook: build the scene, queue audio loads, start playing.
pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    mut rng: ResMut<GameRng>,
    config: Res<GameConfig>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    spawn_scene(&mut commands, &mut rng.0);
    audio_cmds.write_batch(audio_load_commands(&config));
    next_state.set(GameStates::Playing);
}

/// Enter-play hook: clear the previous run's leftovers and put the cat back
/// at the start. Enemies keep their positions and passed flags.
pub fn enter_play(
    mut commands: Commands,
    mut cat: Query<&mut WorldPosition, With<Player>>,
    confetti: Query<Entity, With<Confetti>>,
    mut camera: ResMut<FollowCamera>,
    mut bank: ResMut<SoundBank>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    for entity in confetti.iter() {
        commands.entity(entity).despawn();
    }

    let start = cat_start();
    match cat.single_mut() {
        Ok(mut position) => position.pos = start,
        Err(e) => warn!("No cat to reset: {}", e),
    }
    camera.follow(start);

    // Stop first so a paused track starts over.
    if bank.has_music(MUSIC) && !bank.music_playing {
        audio_cmds.write_batch([
            AudioCmd::StopMusic {
                id: MUSIC.to_string(),
            },
            AudioCmd::PlayMusic {
                id: MUSIC.to_string(),
                looped: true,
            },
        ]);
        bank.music_playing = true;
    }
    info!("Run started");
}

/// Pause the music if it is playing.
fn pause_music(bank: &mut SoundBank, audio_cmds: &mut MessageWriter<AudioCmd>) {
    if bank.music_playing {
        audio_cmds.write(AudioCmd::PauseMusic {
            id: MUSIC.to_string(),
        });
        bank.music_playing = false;
    }
}

/// Game-over hook: sound for the reason, red flash, music off.
pub fn enter_game_over(
    state: Res<GameState>,
    mut flash: ResMut<BackgroundFlash>,
    mut bank: ResMut<SoundBank>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let GameStates::GameOver(reason) = state.get() else {
        warn!("enter_game_over ran in {:?}", state.get());
        return;
    };
    info!("GAME OVER: {:?}", reason);
    let sound = match reason {
        GameOverReason::OffPath => FX_LAVA_FALL,
        GameOverReason::EnemyCollision => FX_COLLISION,
    };
    if bank.has_fx(sound) {
        audio_cmds.write(AudioCmd::PlayFx {
            id: sound.to_string(),
        });
    }
    flash.trigger();
    pause_music(&mut bank, &mut audio_cmds);
}

/// Win hook: fanfare, confetti around the camera, music off.
pub fn enter_win(
    mut commands: Commands,
    camera: Res<FollowCamera>,
    mut rng: ResMut<GameRng>,
    mut bank: ResMut<SoundBank>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    info!("YOU WIN!");
    if bank.has_fx(FX_FANFARE) {
        audio_cmds.write(AudioCmd::PlayFx {
            id: FX_FANFARE.to_string(),
        });
    }
    let batch: Vec<_> = (0..CONFETTI_COUNT)
        .map(|_| {
            let (pos, velocity) = confetti_spawn(&mut rng.0, camera.position);
            (
                WorldPosition { pos },
                Confetti { velocity },
                Tint::random_confetti(&mut rng.0),
            )
        })
        .collect();
    commands.spawn_batch(batch);
    pause_music(&mut bank, &mut audio_cmds);
}
