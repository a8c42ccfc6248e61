// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the invitation views.
//!
//! The `App` struct wires together the countdown, the ceremony slider, the
//! gallery with its lightbox, and the background-music playlist, and
//! translates messages into side effects like slide prefetching or audio
//! commands. Policy decisions (window sizing, autoplay gating, prefetch
//! dispatch) stay close to the main update loop so user-facing behavior is
//! easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::assets::{self, CdnResolver, ImageTransform, Quality, SlideSource};
use crate::audio::{Player, PlayerCommand, MAX_VOLUME, MIN_VOLUME};
use crate::config::{self, Config};
use crate::countdown::Countdown;
use crate::gallery::prefetch::{PrefetchConfig, SlideCache, DEFAULT_MAX_SLIDES, DEFAULT_PREFETCH_DEPTH};
use crate::gallery::swipe::DEFAULT_SWIPE_THRESHOLD;
use crate::gallery::{Carousel, Lightbox, ScrollState, SlideInterval, Slider, SwipeTracker};
use crate::playlist::{self, Playlist};
use chrono::Local;
use iced::widget::image;
use iced::{window, Task};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Root Iced application state bridging the invitation views and the
/// audio engine.
pub struct App {
    /// Invitation heading shown above the countdown.
    title: String,
    couple: Option<String>,
    venue: Option<String>,
    countdown: Countdown,
    slider: Slider,
    swipe: SwipeTracker,
    /// Last observed cursor x over the slider, fed to the swipe tracker.
    slider_cursor_x: f32,
    /// Fixed gallery slide order for the session.
    gallery_slides: Vec<SlideSource>,
    lightbox: Lightbox,
    scroll: ScrollState,
    cache: SlideCache,
    /// Loads already dispatched and not yet completed.
    pending_loads: HashSet<SlideSource>,
    /// Decoded handles for fetched remote slides (local slides render
    /// straight from their path).
    remote_handles: HashMap<SlideSource, image::Handle>,
    playlist: Playlist,
    player: Player,
    autoplay: bool,
    /// Whether a track has ever been handed to the audio engine.
    music_started: bool,
    /// Autoplay waits for the first user interaction.
    interaction_seen: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("gallery_slides", &self.gallery_slides.len())
            .field("slider_slides", &self.slider.carousel().len())
            .field("lightbox_open", &self.lightbox.is_open())
            .field("tracks", &self.playlist.len())
            .finish()
    }
}

/// Builds the window settings.
fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Scans a directory into resolved slide sources, degrading to an empty
/// list (with a log line) when the directory is unusable.
fn scan_slides(directory: Option<&Path>, cdn: Option<&CdnResolver>) -> Vec<SlideSource> {
    let Some(directory) = directory else {
        return Vec::new();
    };

    match assets::scan_images(directory) {
        Ok(paths) => assets::resolve_sources(paths, cdn),
        Err(e) => {
            eprintln!("Failed to scan image directory {}: {}", directory.display(), e);
            Vec::new()
        }
    }
}

impl App {
    /// Initializes application state from configuration and kicks off the
    /// first round of slide prefetching.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = match &flags.config_path {
            Some(path) => match config::load_from_path(path) {
                Ok(config) => (config, None),
                Err(e) => (
                    Config::default(),
                    Some(format!("Ignoring invalid config {}: {}", path.display(), e)),
                ),
            },
            None => config::load(),
        };
        if let Some(warning) = config_warning {
            eprintln!("{warning}");
        }

        let now = Local::now().naive_local();
        let countdown = Countdown::new(config.target_datetime(), now);

        let resolver = config.cdn.cloud_name.as_ref().map(|cloud| {
            let mut transform = ImageTransform::new();
            if let Some(width) = config.cdn.delivery_width {
                transform = transform.width(width);
            }
            transform = match config.cdn.delivery_quality {
                Some(q) => transform.quality(Quality::fixed(q)),
                None => transform.quality(Quality::Auto),
            };
            CdnResolver::new(
                cloud.clone(),
                config.cdn.map.clone().unwrap_or_default(),
                transform,
            )
        });

        let gallery_dir = flags
            .images_dir
            .clone()
            .or_else(|| config.gallery.images_dir.clone());
        let gallery_slides = scan_slides(gallery_dir.as_deref(), resolver.as_ref());

        // The slider falls back to the gallery images when no dedicated
        // ceremony directory is configured.
        let slider_slides = match config.gallery.slider_dir.as_deref() {
            Some(dir) => scan_slides(Some(dir), resolver.as_ref()),
            None => gallery_slides.clone(),
        };

        let interval = SlideInterval::new(
            config
                .slider
                .interval_secs
                .unwrap_or(config::DEFAULT_SLIDE_INTERVAL_SECS),
        );
        let slider = Slider::new(Carousel::new(slider_slides), interval);
        let swipe = SwipeTracker::new(
            config
                .slider
                .swipe_threshold
                .unwrap_or(DEFAULT_SWIPE_THRESHOLD),
        );

        let scroll = ScrollState::new();
        let lightbox = Lightbox::new(gallery_slides.len(), scroll.clone());

        let cache_bytes = config
            .gallery
            .prefetch_cache_mb
            .unwrap_or(config::DEFAULT_PREFETCH_CACHE_MB) as usize
            * 1024
            * 1024;
        let depth = config.gallery.prefetch_depth.unwrap_or(DEFAULT_PREFETCH_DEPTH);
        let cache = SlideCache::new(PrefetchConfig::new(cache_bytes, DEFAULT_MAX_SLIDES, depth));

        let tracks = match config.audio.sounds_dir.as_deref() {
            Some(dir) => playlist::scan_tracks(dir).unwrap_or_else(|e| {
                eprintln!("Failed to scan sounds directory {}: {}", dir.display(), e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        let playlist = Playlist::new(tracks);

        let player = Player::spawn();
        let volume = config
            .audio
            .volume
            .unwrap_or(config::DEFAULT_VOLUME)
            .clamp(MIN_VOLUME, MAX_VOLUME);
        player.send(PlayerCommand::SetVolume(volume));

        let mut app = App {
            title: config
                .event
                .title
                .clone()
                .unwrap_or_else(|| config::DEFAULT_EVENT_TITLE.to_string()),
            couple: config.event.couple.clone(),
            venue: config.event.venue.clone(),
            countdown,
            slider,
            swipe,
            slider_cursor_x: 0.0,
            gallery_slides,
            lightbox,
            scroll,
            cache,
            pending_loads: HashSet::new(),
            remote_handles: HashMap::new(),
            playlist,
            player,
            autoplay: config.audio.autoplay.unwrap_or(true),
            music_started: false,
            interaction_seen: false,
        };

        let task = app.prefetch_around_slider();
        (app, task)
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
