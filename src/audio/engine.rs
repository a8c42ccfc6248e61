// SPDX-License-Identifier: MPL-2.0
//! Playback engine (rodio owner).
//!
//! Owns the output stream (which must stay alive for playback) and the
//! per-track sink, processes commands from the channel, and detects
//! end-of-track on a short internal tick. No Iced imports.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::{PlayerCommand, PlayerEvent, MAX_VOLUME, MIN_VOLUME};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine
    stream: Option<OutputStream>,

    // Current playback
    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    volume: f32,

    // Event channel
    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    #[must_use]
    pub fn new(event_tx: Sender<PlayerEvent>) -> Self {
        Self {
            stream: None,
            sink: None,
            current_path: None,
            volume: MAX_VOLUME,
            event_tx,
        }
    }

    /// Runs the command loop until shutdown or channel disconnect.
    ///
    /// The output stream is opened here rather than at construction so a
    /// machine without an audio device degrades to a single error event
    /// instead of taking the whole kiosk down.
    pub fn run(mut self, command_rx: Receiver<PlayerCommand>) {
        match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => self.stream = Some(stream),
            Err(e) => {
                let _ = self
                    .event_tx
                    .send(PlayerEvent::Error(format!("No audio output: {e}")));
                return;
            }
        }

        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            return;
                        }
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.play_file(path) {
                    let _ = self.event_tx.send(PlayerEvent::Error(e));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(MIN_VOLUME, MAX_VOLUME);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        if let Some(sink) = &self.sink {
            if sink.empty() && self.current_path.is_some() {
                let _ = self.event_tx.send(PlayerEvent::TrackEnded);
                self.stop_internal();
            }
        }
    }

    fn play_file(&mut self, path: PathBuf) -> Result<(), String> {
        self.stop_internal();

        let Some(stream) = &self.stream else {
            return Err("Audio output is not available".to_string());
        };

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);

        let file = File::open(&path).map_err(|e| format!("Failed to open file: {e}"))?;
        let reader = BufReader::new(file);
        let decoder = Decoder::new(reader).map_err(|e| format!("Decode failed: {e}"))?;

        sink.append(decoder);
        sink.play();

        self.current_path = Some(path.clone());
        self.sink = Some(sink);

        let _ = self.event_tx.send(PlayerEvent::Started(path));

        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
    }
}
