//! Game systems.
//!
//! This module groups all ECS systems that advance the run, read input, talk
//! to the audio thread and render.
//!
//! Submodules overview
//! - [`animation`] – advance sprite-sheet timers
//! - [`audio`] – bridge with the audio thread and the loaded-sound bank
//! - [`camera`] – trail the cat with the chase camera
//! - [`confetti`] – fall and clean up win confetti
//! - [`enemy`] – enemy drift, pass detection and collisions
//! - [`flash`] – count down the game-over flash
//! - [`gameconfig`] – apply window settings from [`crate::resources::gameconfig::GameConfig`]
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`render`] – draw the scene, HUD and debug overlay using Raylib
//! - [`runner`] – move the cat and check the win and off-path conditions
//! - [`scroll`] – scroll the ground and lava textures
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod audio;
pub mod camera;
pub mod confetti;
pub mod enemy;
pub mod flash;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod render;
pub mod runner;
pub mod scroll;
pub mod time;
