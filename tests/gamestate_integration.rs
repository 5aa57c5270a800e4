//! Game flow integration tests.
//!
//! These run the real state hooks and observers: `Setup` builds the scene,
//! the first frame enters `Playing`, and each test drives the run into a
//! terminal state and back through the same code paths the window loop uses.

use bevy_ecs::prelude::*;

use lavacat::components::castle::Castle;
use lavacat::components::confetti::Confetti;
use lavacat::components::enemy::Enemy;
use lavacat::components::runner::Player;
use lavacat::components::worldposition::WorldPosition;
use lavacat::events::audio::AudioCmd;
use lavacat::events::input::{InputAction, InputEvent};
use lavacat::game::{add_gameplay_systems, add_observers, insert_core_resources, register_state_hooks, start};
use lavacat::resources::audio::{SoundBank, init_audio_messages};
use lavacat::resources::camera::FollowCamera;
use lavacat::resources::flash::BackgroundFlash;
use lavacat::resources::gamestate::{
    GameOverReason, GameState, GameStates, NextGameState, NextGameStates,
};
use lavacat::rules::{CASTLE_Z, CAT_START_Z, CONFETTI_COUNT, ENEMY_COUNT, FLASH_DURATION, cat_start};
use lavacat::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A world that went through `Setup` and one frame, so it is `Playing`.
fn playing_world() -> (World, Schedule) {
    let mut world = World::new();
    insert_core_resources(&mut world, Some(42));
    init_audio_messages(&mut world);
    register_state_hooks(&mut world);
    add_observers(&mut world);
    start(&mut world);

    let mut schedule = Schedule::default();
    add_gameplay_systems(&mut schedule);
    tick(&mut world, &mut schedule, 0.016);
    assert_eq!(state(&world), GameStates::Playing);
    drain_audio(&mut world);
    (world, schedule)
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get().clone()
}

fn drain_audio(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().drain().collect()
}

fn cat_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .unwrap()
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

fn load_sounds(world: &mut World) {
    let mut bank = world.resource_mut::<SoundBank>();
    bank.music.insert("music".into());
    for id in ["collision", "lava_fall", "fanfare"] {
        bank.fx.insert(id.into());
    }
}

#[test]
fn setup_builds_the_scene_and_queues_audio() {
    let mut world = World::new();
    insert_core_resources(&mut world, Some(42));
    init_audio_messages(&mut world);
    register_state_hooks(&mut world);
    add_observers(&mut world);

    start(&mut world);

    assert_eq!(state(&world), GameStates::Setup);
    assert_eq!(
        world.resource::<NextGameState>().get().clone(),
        NextGameStates::Pending(GameStates::Playing)
    );
    assert_eq!(count::<Player>(&mut world), 1);
    assert_eq!(count::<Castle>(&mut world), 1);
    assert_eq!(count::<Enemy>(&mut world), ENEMY_COUNT);

    let mut zs: Vec<f32> = world
        .query_filtered::<&WorldPosition, With<Enemy>>()
        .iter(&world)
        .map(|p| {
            assert!(p.pos.x.abs() <= 4.0);
            p.pos.z
        })
        .collect();
    zs.sort_by(|a, b| b.total_cmp(a));
    assert!(zs[0] <= CAT_START_Z - 15.0 - 8.0);
    for pair in zs.windows(2) {
        let gap = pair[0] - pair[1];
        assert!((8.0 - EPSILON..40.0).contains(&gap), "gap {gap}");
    }

    let loads = drain_audio(&mut world);
    assert_eq!(loads.len(), 8);
    assert!(loads.iter().any(|cmd| matches!(
        cmd,
        AudioCmd::LoadMusic { id, volume, .. } if id == "music" && approx_eq(*volume, 0.1)
    )));
    assert!(loads.iter().any(|cmd| matches!(
        cmd,
        AudioCmd::LoadFx { id, path, .. } if id == "lava_fall" && path.ends_with("caida_lava2.ogg")
    )));
}

#[test]
fn the_same_seed_lays_out_the_same_enemies() {
    let layout = |seed| {
        let mut world = World::new();
        insert_core_resources(&mut world, Some(seed));
        init_audio_messages(&mut world);
        register_state_hooks(&mut world);
        add_observers(&mut world);
        start(&mut world);
        let mut positions: Vec<(usize, f32, f32)> = world
            .query::<(&Enemy, &WorldPosition)>()
            .iter(&world)
            .map(|(e, p)| (e.index, p.pos.x, p.pos.z))
            .collect();
        positions.sort_by_key(|(index, _, _)| *index);
        positions
    };
    assert_eq!(layout(9), layout(9));
}

#[test]
fn falling_into_the_lava_ends_the_run() {
    let (mut world, mut schedule) = playing_world();
    load_sounds(&mut world);
    world.resource_mut::<SoundBank>().music_playing = true;
    let cat = cat_entity(&mut world);
    world.get_mut::<WorldPosition>(cat).unwrap().pos.x = 6.0;

    tick(&mut world, &mut schedule, 0.016);

    assert_eq!(state(&world), GameStates::GameOver(GameOverReason::OffPath));
    assert!(approx_eq(
        world.resource::<BackgroundFlash>().remaining,
        FLASH_DURATION
    ));
    let cmds = drain_audio(&mut world);
    assert!(cmds.contains(&AudioCmd::PlayFx {
        id: "lava_fall".into()
    }));
    assert!(cmds.contains(&AudioCmd::PauseMusic { id: "music".into() }));
    assert!(!world.resource::<SoundBank>().music_playing);

    // The simulation is stopped, the flash fades.
    let z = world.get::<WorldPosition>(cat).unwrap().pos.z;
    tick(&mut world, &mut schedule, 0.2);
    assert!(approx_eq(world.get::<WorldPosition>(cat).unwrap().pos.z, z));
    assert!(!world.resource::<BackgroundFlash>().is_active());
}

#[test]
fn running_into_an_enemy_plays_the_collision_sound() {
    let (mut world, mut schedule) = playing_world();
    load_sounds(&mut world);
    let cat = cat_entity(&mut world);
    let cat_pos = world.get::<WorldPosition>(cat).unwrap().pos;
    let enemy = world
        .query_filtered::<Entity, With<Enemy>>()
        .iter(&world)
        .next()
        .unwrap();
    // Where the cat will be after the next frame.
    world.get_mut::<WorldPosition>(enemy).unwrap().pos.x = cat_pos.x;
    world.get_mut::<WorldPosition>(enemy).unwrap().pos.z = cat_pos.z - 0.16;

    tick(&mut world, &mut schedule, 0.016);

    assert_eq!(
        state(&world),
        GameStates::GameOver(GameOverReason::EnemyCollision)
    );
    let cmds = drain_audio(&mut world);
    assert!(cmds.contains(&AudioCmd::PlayFx {
        id: "collision".into()
    }));
    assert!(!cmds.contains(&AudioCmd::PlayFx {
        id: "lava_fall".into()
    }));
}

#[test]
fn reaching_the_castle_throws_confetti() {
    let (mut world, mut schedule) = playing_world();
    load_sounds(&mut world);
    let cat = cat_entity(&mut world);
    world.get_mut::<WorldPosition>(cat).unwrap().pos.z = CASTLE_Z + 5.1;

    tick(&mut world, &mut schedule, 0.016);

    assert_eq!(state(&world), GameStates::Won);
    assert_eq!(count::<Confetti>(&mut world), CONFETTI_COUNT);
    assert!(drain_audio(&mut world).contains(&AudioCmd::PlayFx {
        id: "fanfare".into()
    }));

    let camera = world.resource::<FollowCamera>().position;
    for position in world
        .query_filtered::<&WorldPosition, With<Confetti>>()
        .iter(&world)
    {
        assert!(position.pos.y >= camera.y + 5.0 && position.pos.y <= camera.y + 15.0);
        assert!(position.pos.x.abs() <= 7.5);
    }

    // Everything lands below the floor eventually.
    for _ in 0..100 {
        tick(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(count::<Confetti>(&mut world), 0);
    assert_eq!(state(&world), GameStates::Won);
}

#[test]
fn restart_resets_the_cat_but_not_the_enemies() {
    let (mut world, mut schedule) = playing_world();
    load_sounds(&mut world);
    let cat = cat_entity(&mut world);
    world.get_mut::<WorldPosition>(cat).unwrap().pos.z = CASTLE_Z + 5.1;
    let enemy = world
        .query_filtered::<Entity, With<Enemy>>()
        .iter(&world)
        .next()
        .unwrap();
    world.get_mut::<Enemy>(enemy).unwrap().has_passed = true;
    let enemy_pos = world.get::<WorldPosition>(enemy).unwrap().pos;
    tick(&mut world, &mut schedule, 0.016);
    assert_eq!(state(&world), GameStates::Won);
    drain_audio(&mut world);

    world.trigger(InputEvent {
        action: InputAction::Restart,
        pressed: true,
    });
    tick(&mut world, &mut schedule, 0.016);

    assert_eq!(state(&world), GameStates::Playing);
    let start = cat_start();
    let cat_pos = world.get::<WorldPosition>(cat).unwrap().pos;
    assert!(approx_eq(cat_pos.x, start.x) && approx_eq(cat_pos.z, start.z));
    assert!(approx_eq(
        world.resource::<FollowCamera>().position.z,
        start.z + 5.0
    ));
    assert_eq!(count::<Confetti>(&mut world), 0);
    assert!(world.get::<Enemy>(enemy).unwrap().has_passed);
    let after = world.get::<WorldPosition>(enemy).unwrap().pos;
    assert!(approx_eq(after.x, enemy_pos.x) && approx_eq(after.z, enemy_pos.z));
    let music_cmds: Vec<AudioCmd> = drain_audio(&mut world)
        .into_iter()
        .filter(|cmd| matches!(cmd, AudioCmd::StopMusic { .. } | AudioCmd::PlayMusic { .. }))
        .collect();
    assert_eq!(
        music_cmds,
        vec![
            AudioCmd::StopMusic { id: "music".into() },
            AudioCmd::PlayMusic {
                id: "music".into(),
                looped: true
            },
        ]
    );
    assert!(world.resource::<SoundBank>().music_playing);
}

#[test]
fn restart_is_ignored_while_playing() {
    let (mut world, _schedule) = playing_world();

    world.trigger(InputEvent {
        action: InputAction::Restart,
        pressed: true,
    });

    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn first_steer_starts_the_music_once() {
    let (mut world, _schedule) = playing_world();
    load_sounds(&mut world);

    for _ in 0..2 {
        world.trigger(InputEvent {
            action: InputAction::SteerLeft,
            pressed: true,
        });
    }

    let plays = drain_audio(&mut world)
        .into_iter()
        .filter(|cmd| matches!(cmd, AudioCmd::PlayMusic { .. }))
        .count();
    assert_eq!(plays, 1);
    assert!(world.resource::<SoundBank>().music_playing);
}

#[test]
fn only_steering_starts_the_music() {
    let (mut world, _schedule) = playing_world();
    load_sounds(&mut world);

    world.trigger(InputEvent {
        action: InputAction::Restart,
        pressed: true,
    });
    world.trigger(InputEvent {
        action: InputAction::SteerRight,
        pressed: false,
    });

    assert!(drain_audio(&mut world).is_empty());
    assert!(!world.resource::<SoundBank>().music_playing);
}

#[test]
fn steering_without_loaded_music_stays_silent() {
    let (mut world, _schedule) = playing_world();

    world.trigger(InputEvent {
        action: InputAction::SteerRight,
        pressed: true,
    });

    assert!(drain_audio(&mut world).is_empty());
    assert!(!world.resource::<SoundBank>().music_playing);
}
