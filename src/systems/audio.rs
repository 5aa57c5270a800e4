//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, answering with [`AudioMessage`].
//! - [`forward_audio_cmds`] pushes the commands written this frame down the
//!   channel.
//! - [`poll_audio_messages`] non-blockingly drains the thread's replies into
//!   the ECS message queue, and [`track_loaded_sounds`] records what loaded
//!   in the [`SoundBank`].
//!
//! Raylib audio calls stay on one thread; the game thread only talks to it
//! through channels. Without an [`AudioBridge`] (muted, or in tests) the
//! forwarding systems do nothing and commands are simply dropped.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBridge, SoundBank};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending replies from the audio thread into
/// [`Messages<AudioMessage>`].
pub fn poll_audio_messages(
    bridge: Option<Res<AudioBridge>>,
    mut writer: MessageWriter<AudioMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run after [`poll_audio_messages`] so replies written this frame become
/// readable.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Record loaded and failed sounds so gameplay only asks for ones that exist.
pub fn track_loaded_sounds(mut reader: MessageReader<AudioMessage>, mut bank: ResMut<SoundBank>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoaded { id } => {
                bank.music.insert(id.clone());
            }
            AudioMessage::FxLoaded { id } => {
                bank.fx.insert(id.clone());
            }
            AudioMessage::MusicLoadFailed { id, error } | AudioMessage::FxLoadFailed { id, error } => {
                error!("Audio '{}' failed to load: {}", id, error);
            }
            AudioMessage::MusicPlayStarted { id } | AudioMessage::MusicStopped { id } => {
                debug!("Music '{}' state changed: {:?}", id, msg);
            }
        }
    }
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Consume so a later bridge does not replay stale commands.
        for _ in reader.read() {}
        return;
    };
    for cmd in reader.read() {
        // Ignore send errors during shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Initializes the Raylib audio device, owns every `Music` and `Sound`
/// handle, and reacts to [`AudioCmd`] until [`AudioCmd::Shutdown`]. Looping
/// music is restarted here when its stream runs out.
///
/// When the device cannot be opened the thread keeps serving the channel,
/// answering every load with a failure, so the game runs silently.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            serve_without_device(&rx_cmd, &tx_evt, &e.to_string());
            return;
        }
    };

    info!(
        "Audio thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) Drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path, volume } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("[audio] loaded id='{}' path='{}'", id, path);
                        music.set_volume(volume);
                        musics.insert(id.clone(), music);
                        let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: format!("{}: {}", path, e),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] play start id='{}' looped={}", id, want_loop);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::PauseMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] pause id='{}'", id);
                        music.pause_stream();
                        playing.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("[audio] stop id='{}'", id);
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::LoadFx { id, path, volume } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sound.set_volume(volume);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: format!("{}: {}", path, e),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("[audio] fx play id='{}'", id);
                        sound.play();
                    } else {
                        warn!("[audio] fx play failed id='{}' reason='not loaded'", id);
                    }
                }
                AudioCmd::Shutdown => {
                    debug!("[audio] shutdown requested");
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    sounds.clear();
                    break 'run;
                }
            }
        }

        // 2) Pump streaming; `update_stream()` must be called regularly while playing.
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended.iter() {
            match musics.get(id) {
                Some(music) if looped.contains(id) => {
                    debug!("[audio] restarting looped id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                }
                _ => {
                    playing.remove(id);
                    let _ = tx_evt.send(AudioMessage::MusicStopped { id: id.clone() });
                }
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    } // 'run

    info!(
        "Audio thread exiting (id={:?})",
        std::thread::current().id()
    );

    // musics and sounds drop before `audio`, satisfying lifetimes
}

/// Answer commands without an audio device until shutdown.
fn serve_without_device(rx_cmd: &Receiver<AudioCmd>, tx_evt: &Sender<AudioMessage>, reason: &str) {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::LoadMusic { id, .. } => {
                let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                    id,
                    error: reason.to_string(),
                });
            }
            AudioCmd::LoadFx { id, .. } => {
                let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                    id,
                    error: reason.to_string(),
                });
            }
            AudioCmd::Shutdown => break,
            _ => {}
        }
    }
}
