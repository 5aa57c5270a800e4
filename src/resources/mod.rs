//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `animationstore` – sprite-sheet clips shared by the cat and enemies
//! - `audio` – bridge to the background audio thread and the loaded-sound bank
//! - `camera` – chase camera trailing the cat
//! - `debugmode` – presence toggles the debug overlay
//! - `flash` – red background flash after a lost run
//! - `gameconfig` – settings read from `config.ini`
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keys and on-screen buttons relevant to the game
//! - `rng` – seeded random generator
//! - `systemsstore` – registry of state hooks by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `windowsize` – current window dimensions and HUD layout
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod camera;
pub mod debugmode;
pub mod flash;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod rng;
pub mod systemsstore;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
