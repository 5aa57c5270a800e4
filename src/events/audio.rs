//! Messages exchanged with the audio thread.
//!
//! Gameplay code writes [`AudioCmd`] into `Messages<AudioCmd>`; a forwarding
//! system pushes them down the channel. The thread answers with
//! [`AudioMessage`], which is drained back into `Messages<AudioMessage>`.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String, volume: f32 },
    PlayMusic { id: String, looped: bool },
    PauseMusic { id: String },
    StopMusic { id: String },
    LoadFx { id: String, path: String, volume: f32 },
    PlayFx { id: String },
    Shutdown,
}

/// Events sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}
