//! Lava Cat entry point.
//!
//! A small 3D runner built on:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The cat runs down a path between two lava fields towards a castle. Steer
//! with the arrow keys, A/D or the on-screen buttons; leaving the path or
//! touching an enemy ends the run.
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini`, open the window
//! 2. Load textures, start the audio thread, insert resources
//! 3. Register state hooks and observers, enter the `Setup` state
//! 4. Run the frame loop: input, simulation, state transitions, audio, render
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use lavacat::game;
use lavacat::resources::audio::{init_audio_messages, setup_audio, shutdown_audio};
use lavacat::resources::gameconfig::GameConfig;
use lavacat::resources::windowsize::WindowSize;
use lavacat::systems::gameconfig::apply_gameconfig_changes;
use lavacat::systems::gamestate::check_pending_state;
use lavacat::systems::input::update_input_state;
use lavacat::systems::render::render_system;
use lavacat::systems::runner::runner_movement;
use lavacat::systems::time::update_world_time;
use log::{error, info, warn};
use std::path::PathBuf;

/// Lava Cat: run to the castle, stay out of the lava.
#[derive(Parser)]
#[command(version, about = "Lava Cat: run to the castle, stay out of the lava.")]
struct Cli {
    /// Configuration file to read.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for the enemy layout and confetti. Random when absent.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Asset directory, overriding the configuration file.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Run without sound.
    #[arg(long)]
    mute: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {}", e);
    }
    if let Some(assets) = cli.assets {
        config.assets_path = assets;
    }

    // Early-exit: dump the configuration and quit (no window/audio needed)
    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("Configuration written to {}", config.config_path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    info!("Lava Cat starting, assets in {:?}", config.assets_path);
    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Lava Cat")
        .build();
    rl.set_target_fps(config.target_fps);

    let textures = game::load_textures(&mut rl, &thread, &config);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(textures);

    if cli.mute || !config.audio_enabled {
        info!("Audio disabled");
        init_audio_messages(&mut world);
    } else {
        setup_audio(&mut world); // must go before the game setup, which queues the loads
    }
    world.insert_resource(config);
    game::insert_core_resources(&mut world, cli.seed);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    game::register_state_hooks(&mut world);
    game::add_observers(&mut world);
    game::start(&mut world);

    let mut update = Schedule::default();
    update.add_systems(
        (update_input_state, apply_gameconfig_changes)
            .chain()
            .before(runner_movement),
    );
    game::add_gameplay_systems(&mut update);
    update.add_systems(render_system.after(check_pending_state));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        shutdown_audio(&mut world);
        return;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        // Update window size each frame (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    info!("Bye!");
    shutdown_audio(&mut world);
}
