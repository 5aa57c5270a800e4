//! Frame loop integration tests.
//!
//! Each test builds a `World` with the core resources, puts it straight into
//! the `Playing` state and ticks the gameplay schedule without a window. No
//! observers are registered here, so a requested transition stays pending in
//! `NextGameState` where the tests can look at it.
//!
//! ```sh
//! cargo test --test frame_loop_integration
//! ```

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use lavacat::components::animation::Animation;
use lavacat::components::castle::Castle;
use lavacat::components::confetti::Confetti;
use lavacat::components::enemy::Enemy;
use lavacat::components::runner::{Player, Runner};
use lavacat::components::worldposition::WorldPosition;
use lavacat::events::audio::AudioCmd;
use lavacat::game::{add_gameplay_systems, insert_core_resources};
use lavacat::resources::animationstore::WALK;
use lavacat::resources::audio::{SoundBank, init_audio_messages};
use lavacat::resources::camera::FollowCamera;
use lavacat::resources::gamestate::{GameOverReason, GameState, GameStates, NextGameState, NextGameStates};
use lavacat::resources::input::InputState;
use lavacat::rules::{CASTLE_Z, PATH_WIDTH, cat_start, is_off_path, standing_height};
use lavacat::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    insert_core_resources(&mut world, Some(7));
    init_audio_messages(&mut world);
    world.resource_mut::<GameState>().set(GameStates::Playing);
    world
}

fn make_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    add_gameplay_systems(&mut schedule);
    schedule
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

fn spawn_cat(world: &mut World, pos: Vector3) -> Entity {
    world
        .spawn((
            Player,
            Runner::default(),
            WorldPosition { pos },
            Animation::new(WALK),
        ))
        .id()
}

fn spawn_castle(world: &mut World) {
    world.spawn((Castle, WorldPosition::new(0.0, standing_height(10.0), CASTLE_Z)));
}

fn spawn_enemy(world: &mut World, index: usize, x: f32, z: f32) -> Entity {
    world
        .spawn((
            Enemy::new(index),
            WorldPosition::new(x, standing_height(1.2), z),
        ))
        .id()
}

fn position(world: &World, entity: Entity) -> Vector3 {
    world.get::<WorldPosition>(entity).unwrap().pos
}

fn pending(world: &World) -> NextGameStates {
    world.resource::<NextGameState>().get().clone()
}

fn drain_audio(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().drain().collect()
}

// =============================================================================
// Cat movement
// =============================================================================

#[test]
fn cat_runs_forward_at_fixed_height() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    let cat = spawn_cat(&mut world, cat_start());

    tick(&mut world, &mut schedule, 0.1);

    let pos = position(&world, cat);
    assert!(approx_eq(pos.x, 0.0));
    assert!(approx_eq(pos.y, 0.75));
    assert!(approx_eq(pos.z, 44.0));
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

#[test]
fn opposite_intents_cancel_out() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    let cat = spawn_cat(&mut world, cat_start());
    {
        let mut input = world.resource_mut::<InputState>();
        input.steer_left.active = true;
        input.pointer_right.active = true;
    }

    tick(&mut world, &mut schedule, 0.5);

    assert!(approx_eq(position(&world, cat).x, 0.0));
}

#[test]
fn holding_left_leads_into_the_lava() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    let cat = spawn_cat(&mut world, cat_start());
    world.resource_mut::<InputState>().steer_left_alt.active = true;

    let mut last_x = 0.0;
    for _ in 0..20 {
        tick(&mut world, &mut schedule, 0.1);
        let x = position(&world, cat).x;
        assert!(x < last_x, "x keeps decreasing while left is held");
        last_x = x;
        if is_off_path(x, PATH_WIDTH) {
            break;
        }
        assert_eq!(pending(&world), NextGameStates::Unchanged);
    }

    assert!(last_x < -PATH_WIDTH / 2.0);
    assert_eq!(
        pending(&world),
        NextGameStates::Pending(GameStates::GameOver(GameOverReason::OffPath))
    );
}

// =============================================================================
// Win
// =============================================================================

#[test]
fn reaching_the_castle_wins_and_skips_the_rest_of_the_frame() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    // Off the path as well: the win must take precedence.
    let cat = spawn_cat(&mut world, Vector3::new(6.0, 0.75, CASTLE_Z + 5.5));
    let camera_before = world.resource::<FollowCamera>().position;

    tick(&mut world, &mut schedule, 0.1);

    assert!(position(&world, cat).z <= CASTLE_Z + 5.0);
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Won));
    let camera_after = world.resource::<FollowCamera>().position;
    assert!(approx_eq(camera_before.z, camera_after.z));
}

#[test]
fn no_win_just_outside_the_buffer() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    spawn_cat(&mut world, Vector3::new(0.0, 0.75, CASTLE_Z + 6.5));

    tick(&mut world, &mut schedule, 0.1);

    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

// =============================================================================
// Enemies
// =============================================================================

#[test]
fn pass_flag_flips_once_and_queues_a_pass_sound() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    {
        let mut bank = world.resource_mut::<SoundBank>();
        bank.fx.insert("pass1".to_string());
        bank.fx.insert("pass3".to_string());
    }
    spawn_cat(&mut world, cat_start());
    let enemy = spawn_enemy(&mut world, 0, 3.0, 44.5);

    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<Enemy>(enemy).unwrap().has_passed);
    let cmds = drain_audio(&mut world);
    let pass_cmds: Vec<_> = cmds
        .iter()
        .filter(|cmd| matches!(cmd, AudioCmd::PlayFx { .. }))
        .collect();
    assert_eq!(pass_cmds.len(), 1);
    assert!(
        pass_cmds[0] == &AudioCmd::PlayFx { id: "pass1".into() }
            || pass_cmds[0] == &AudioCmd::PlayFx { id: "pass3".into() }
    );

    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<Enemy>(enemy).unwrap().has_passed);
    assert!(drain_audio(&mut world).is_empty());
}

#[test]
fn passing_without_pass_sounds_is_silent() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_cat(&mut world, cat_start());
    let enemy = spawn_enemy(&mut world, 0, -3.0, 44.5);

    tick(&mut world, &mut schedule, 0.1);

    assert!(world.get::<Enemy>(enemy).unwrap().has_passed);
    assert!(drain_audio(&mut world).is_empty());
}

#[test]
fn touching_an_enemy_ends_the_run() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    spawn_cat(&mut world, cat_start());
    spawn_enemy(&mut world, 0, 0.3, 44.0);

    tick(&mut world, &mut schedule, 0.1);

    assert_eq!(
        pending(&world),
        NextGameStates::Pending(GameStates::GameOver(GameOverReason::EnemyCollision))
    );
}

#[test]
fn falling_off_the_path_wins_over_a_collision_in_the_same_frame() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_castle(&mut world);
    spawn_cat(&mut world, Vector3::new(5.4, 0.75, 45.0));
    spawn_enemy(&mut world, 0, 5.5, 44.0);

    tick(&mut world, &mut schedule, 0.1);

    assert_eq!(
        pending(&world),
        NextGameStates::Pending(GameStates::GameOver(GameOverReason::OffPath))
    );
}

#[test]
fn enemies_drift_only_inside_the_activation_window() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_cat(&mut world, Vector3::new(2.0, 0.75, 45.0));
    let near = spawn_enemy(&mut world, 0, 0.0, 40.0);
    let far = spawn_enemy(&mut world, 1, 0.0, 30.0);
    let aligned = spawn_enemy(&mut world, 2, 1.95, 41.0);
    let behind = spawn_enemy(&mut world, 3, -2.0, 46.0);

    tick(&mut world, &mut schedule, 0.1);

    assert!(approx_eq(position(&world, near).x, 0.1));
    assert!(approx_eq(position(&world, far).x, 0.0));
    assert!(approx_eq(position(&world, aligned).x, 1.95));
    assert!(approx_eq(position(&world, behind).x, -2.0));
}

#[test]
fn drift_stops_at_the_cat_lane() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    spawn_cat(&mut world, Vector3::new(0.5, 0.75, 45.0));
    let enemy = spawn_enemy(&mut world, 0, 0.0, 30.0);

    // One long frame: the cat lands 5 units ahead of the enemy and the full
    // step (1.0) would overshoot the 0.5 gap.
    tick(&mut world, &mut schedule, 1.0);

    assert!(approx_eq(position(&world, enemy).x, 0.5));
}

// =============================================================================
// Animation and terminal states
// =============================================================================

#[test]
fn animation_cycles_through_four_frames() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    let sprite = world.spawn(Animation::new(WALK)).id();

    let mut frames = Vec::new();
    for _ in 0..5 {
        tick(&mut world, &mut schedule, 0.1);
        frames.push(world.get::<Animation>(sprite).unwrap().frame_index);
    }

    assert_eq!(frames, vec![1, 2, 3, 0, 1]);
}

#[test]
fn a_long_frame_advances_one_animation_frame() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    let sprite = world.spawn(Animation::new(WALK)).id();

    tick(&mut world, &mut schedule, 0.35);

    let anim = world.get::<Animation>(sprite).unwrap();
    assert_eq!(anim.frame_index, 1);
    assert!(approx_eq(anim.elapsed_time, 0.25));
}

#[test]
fn terminal_state_freezes_the_run_but_confetti_keeps_falling() {
    let mut world = make_world();
    let mut schedule = make_schedule();
    world.resource_mut::<GameState>().set(GameStates::Won);
    let cat = spawn_cat(&mut world, cat_start());
    let sinking = world
        .spawn((
            WorldPosition::new(0.0, -4.9, 40.0),
            Confetti {
                velocity: Vector3::new(0.0, -2.0, 0.0),
            },
        ))
        .id();
    let floating = world
        .spawn((
            WorldPosition::new(0.0, 10.0, 40.0),
            Confetti {
                velocity: Vector3::new(0.0, -2.0, 0.0),
            },
        ))
        .id();

    tick(&mut world, &mut schedule, 0.1);

    assert!(approx_eq(position(&world, cat).z, 45.0));
    assert!(world.get_entity(sinking).is_err());
    assert!(approx_eq(position(&world, floating).y, 9.8));
    assert!(approx_eq(
        world.get::<Confetti>(floating).unwrap().velocity.y,
        -2.2
    ));
}
