// SPDX-License-Identifier: MPL-2.0
//! Audio playback for the background-music playlist.
//!
//! Playback runs on a dedicated engine thread that owns the audio output
//! stream and the per-track sink. The application commands it over a
//! channel and drains its events on the regular UI tick; no audio type
//! ever crosses into the Iced state.

mod engine;

pub use engine::PlaybackEngine;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Minimum playback volume.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum playback volume.
pub const MAX_VOLUME: f32 = 1.0;

/// Commands accepted by the engine thread.
#[derive(Debug)]
pub enum PlayerCommand {
    /// Start playing the given file from the beginning.
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    /// Set playback volume, clamped to 0.0..=1.0.
    SetVolume(f32),
    Shutdown,
}

/// Events reported back by the engine thread.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// Playback of a file started.
    Started(PathBuf),
    /// The current track played to its end.
    TrackEnded,
    /// A command failed; the message is suitable for the log.
    Error(String),
}

/// Handle to a running playback engine.
///
/// Commands are best-effort: if the engine thread died, they are dropped.
/// Events are drained with [`Player::poll_events`]. Dropping the handle
/// shuts the engine down and joins its thread.
#[derive(Debug)]
pub struct Player {
    command_tx: Sender<PlayerCommand>,
    event_rx: Receiver<PlayerEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Player {
    /// Spawns the engine thread and returns its handle.
    #[must_use]
    pub fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("audio-engine".into())
            .spawn(move || {
                PlaybackEngine::new(event_tx).run(command_rx);
            })
            .ok();

        Self {
            command_tx,
            event_rx,
            thread,
        }
    }

    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, command: PlayerCommand) {
        let _ = self.command_tx.send(command);
    }

    /// Drains every event the engine has produced since the last poll.
    pub fn poll_events(&self) -> Vec<PlayerEvent> {
        self.event_rx.try_iter().collect()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
