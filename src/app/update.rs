// SPDX-License-Identifier: MPL-2.0
//! Message handling and side-effect dispatch.

use super::{App, Message};
use crate::assets::SlideSource;
use crate::audio::{PlayerCommand, PlayerEvent};
use crate::gallery::prefetch::{load_slide, prefetch_plan};
use crate::gallery::SwipeOutcome;
use chrono::Local;
use iced::widget::image;
use iced::Task;

impl App {
    /// Single update entrypoint for every message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CountdownTick => {
                // Recompute from the fixed target and the live clock; the
                // tick is idempotent once the target has passed.
                self.countdown.tick(Local::now().naive_local());
                self.drain_audio_events();
                Task::none()
            }
            Message::SliderTick => {
                if self.slider.auto_advance() {
                    self.prefetch_around_slider()
                } else {
                    Task::none()
                }
            }

            Message::SliderNext => {
                self.mark_interaction();
                self.slider.next();
                self.prefetch_around_slider()
            }
            Message::SliderPrevious => {
                self.mark_interaction();
                self.slider.previous();
                self.prefetch_around_slider()
            }
            Message::SliderGoTo(index) => {
                self.mark_interaction();
                if self.slider.go_to(index) {
                    self.prefetch_around_slider()
                } else {
                    Task::none()
                }
            }
            Message::SliderEntered => {
                self.slider.set_paused(true);
                Task::none()
            }
            Message::SliderExited => {
                self.slider.set_paused(false);
                self.swipe.cancel();
                Task::none()
            }
            Message::SliderCursorMoved(point) => {
                self.slider_cursor_x = point.x;
                Task::none()
            }
            Message::SliderPressed => {
                self.mark_interaction();
                self.swipe.begin(self.slider_cursor_x);
                Task::none()
            }
            Message::SliderReleased => match self.swipe.end(self.slider_cursor_x) {
                SwipeOutcome::Next => {
                    self.slider.next();
                    self.prefetch_around_slider()
                }
                SwipeOutcome::Previous => {
                    self.slider.previous();
                    self.prefetch_around_slider()
                }
                SwipeOutcome::None => Task::none(),
            },

            Message::OpenLightbox(index) => {
                self.mark_interaction();
                if self.lightbox.open(index) {
                    self.prefetch_around_lightbox()
                } else {
                    Task::none()
                }
            }
            Message::CloseLightbox => {
                self.lightbox.close();
                Task::none()
            }
            Message::LightboxNext => {
                if self.lightbox.is_open() {
                    self.lightbox.next();
                    self.prefetch_around_lightbox()
                } else {
                    Task::none()
                }
            }
            Message::LightboxPrevious => {
                if self.lightbox.is_open() {
                    self.lightbox.previous();
                    self.prefetch_around_lightbox()
                } else {
                    Task::none()
                }
            }

            Message::TogglePlayback => {
                self.interaction_seen = true;
                if !self.music_started {
                    self.start_current_track();
                } else if self.playlist.is_playing() {
                    self.player.send(PlayerCommand::Pause);
                    self.playlist.set_playing(false);
                } else {
                    self.player.send(PlayerCommand::Resume);
                    self.playlist.set_playing(true);
                }
                Task::none()
            }
            Message::TrackSelected(index) => {
                self.interaction_seen = true;
                if self.playlist.select(index) {
                    self.start_current_track();
                }
                Task::none()
            }

            Message::SlidePrefetched { source, result } => {
                self.pending_loads.remove(&source);
                match result {
                    Ok(bytes) => {
                        if matches!(source, SlideSource::Remote(_)) {
                            self.remote_handles
                                .entry(source.clone())
                                .or_insert_with(|| image::Handle::from_bytes(bytes.clone()));
                        }
                        self.cache.insert(source, bytes);
                    }
                    // A failed prefetch never blocks navigation
                    Err(e) => eprintln!("Failed to prefetch slide: {}", e),
                }
                Task::none()
            }
        }
    }

    /// Records the first user interaction; autoplay waits for it.
    fn mark_interaction(&mut self) {
        if self.interaction_seen {
            return;
        }
        self.interaction_seen = true;
        if self.autoplay && !self.music_started {
            self.start_current_track();
        }
    }

    /// Hands the playlist's current track to the audio engine.
    fn start_current_track(&mut self) {
        let file = self.playlist.current_track().map(|t| t.file.clone());
        if let Some(file) = file {
            self.player.send(PlayerCommand::PlayFile(file));
            self.music_started = true;
            self.playlist.set_playing(true);
        }
    }

    /// Drains pending audio engine events (called on the 1 Hz tick).
    fn drain_audio_events(&mut self) {
        for event in self.player.poll_events() {
            match event {
                PlayerEvent::Started(_) => self.playlist.set_playing(true),
                PlayerEvent::TrackEnded => {
                    let next = self.playlist.on_track_end().map(|t| t.file.clone());
                    if let Some(file) = next {
                        self.player.send(PlayerCommand::PlayFile(file));
                    }
                }
                PlayerEvent::Error(message) => {
                    eprintln!("Playback error: {}", message);
                    self.playlist.set_playing(false);
                }
            }
        }
    }

    /// Prefetches the slider's current and adjacent slides.
    pub(super) fn prefetch_around_slider(&mut self) -> Task<Message> {
        let carousel = self.slider.carousel();
        let Some(current) = carousel.current_index() else {
            return Task::none();
        };

        let mut wanted = Vec::new();
        if let Some(source) = carousel.current() {
            wanted.push(source.clone());
        }
        for index in prefetch_plan(current, carousel.len(), self.cache.depth()) {
            if let Some(source) = carousel.get(index) {
                wanted.push(source.clone());
            }
        }
        self.dispatch_loads(wanted)
    }

    /// Prefetches the lightbox's current and adjacent gallery slides.
    pub(super) fn prefetch_around_lightbox(&mut self) -> Task<Message> {
        let Some(current) = self.lightbox.current() else {
            return Task::none();
        };

        let mut wanted = Vec::new();
        if let Some(source) = self.gallery_slides.get(current) {
            wanted.push(source.clone());
        }
        for index in prefetch_plan(current, self.gallery_slides.len(), self.cache.depth()) {
            if let Some(source) = self.gallery_slides.get(index) {
                wanted.push(source.clone());
            }
        }
        self.dispatch_loads(wanted)
    }

    /// Spawns background loads for sources not cached and not in flight.
    fn dispatch_loads(&mut self, wanted: Vec<SlideSource>) -> Task<Message> {
        if !self.cache.is_enabled() {
            return Task::none();
        }

        let missing: Vec<SlideSource> = self
            .cache
            .missing_from(&wanted)
            .into_iter()
            .filter(|source| !self.pending_loads.contains(source))
            .collect();

        let mut tasks = Vec::new();
        for source in missing {
            self.pending_loads.insert(source.clone());
            tasks.push(Task::perform(load_slide(source), |(source, result)| {
                Message::SlidePrefetched { source, result }
            }));
        }
        Task::batch(tasks)
    }
}
