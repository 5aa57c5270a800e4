//! Event types and observers used by the game.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`input`] – logical input actions and the observers that react to them
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod gamestate;
pub mod input;
pub mod switchdebug;
