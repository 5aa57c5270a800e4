//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world: the cat, the enemies, the castle, the scenery and the win
//! confetti.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet playback state
//! - [`billboard`] – camera-facing sprite with a colour fallback
//! - [`castle`] – marker for the goal
//! - [`confetti`] – velocity of a falling confetti particle
//! - [`enemy`] – obstacle with its one-shot "passed" flag
//! - [`runner`] – the cat marker and its movement parameters
//! - [`surface`] – scrolling textured planes and solid boxes
//! - [`tint`] – draw colour of billboards and confetti
//! - [`worldposition`] – 3D position of an entity

pub mod animation;
pub mod billboard;
pub mod castle;
pub mod confetti;
pub mod enemy;
pub mod runner;
pub mod surface;
pub mod tint;
pub mod worldposition;
