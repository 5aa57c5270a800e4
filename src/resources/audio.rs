//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] resource. [`init_audio_messages`] registers
//! the message queues on their own, so a muted game (or a test world) can run
//! every audio-emitting system without a thread behind it. Call
//! [`shutdown_audio`] during teardown to stop the thread and free audio
//! resources.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;

pub const MUSIC: &str = "music";
pub const FX_COLLISION: &str = "collision";
pub const FX_LAVA_FALL: &str = "lava_fall";
pub const FX_FANFARE: &str = "fanfare";
pub const FX_PASS: [&str; 4] = ["pass1", "pass2", "pass3", "pass4"];

/// Shared bridge between the ECS world and the audio thread.
///
/// Systems send commands via [`AudioBridge::tx_cmd`] and poll for replies
/// via [`AudioBridge::rx_msg`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// What the game knows about loaded audio.
///
/// `music` and `fx` are filled from the audio thread's replies, so a sound
/// that failed to load never shows up here and is never asked to play.
/// `music_playing` is owned by the main thread and flips when play/pause is
/// requested.
#[derive(Resource, Debug, Default, Clone)]
pub struct SoundBank {
    pub music: FxHashSet<String>,
    pub fx: FxHashSet<String>,
    pub music_playing: bool,
}

impl SoundBank {
    pub fn has_music(&self, id: &str) -> bool {
        self.music.contains(id)
    }

    pub fn has_fx(&self, id: &str) -> bool {
        self.fx.contains(id)
    }

    /// The pass sounds that actually loaded, in declaration order.
    pub fn loaded_pass_sounds(&self) -> Vec<&'static str> {
        FX_PASS.iter().copied().filter(|id| self.has_fx(id)).collect()
    }
}

/// Register the audio message queues and the [`SoundBank`].
pub fn init_audio_messages(world: &mut World) {
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
    world.insert_resource(SoundBank::default());
}

/// Spawn the audio thread and register bridge resources.
///
/// This function:
/// - Creates command/event channels.
/// - Spawns the background thread running [`audio_thread`].
/// - Inserts [`AudioBridge`] and the message queues (see
///   [`init_audio_messages`]).
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    init_audio_messages(world);
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
