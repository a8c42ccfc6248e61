// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::assets::SlideSource;
use crate::error::Error;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. Every timer, pointer and
/// keyboard interaction funnels through this single entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// 1 Hz countdown tick; also drains audio engine events.
    CountdownTick,
    /// Slider auto-advance tick (only emitted while unpaused).
    SliderTick,

    /// Manual slider navigation.
    SliderNext,
    SliderPrevious,
    SliderGoTo(usize),
    /// Pointer entered the slider area; auto-advance pauses.
    SliderEntered,
    /// Pointer left the slider area; auto-advance resumes.
    SliderExited,
    /// Pointer moved over the slider (tracked for swipe recognition).
    SliderCursorMoved(iced::Point),
    /// Pointer pressed over the slider; a swipe gesture may start.
    SliderPressed,
    /// Pointer released over the slider; the gesture resolves.
    SliderReleased,

    /// A gallery thumbnail was clicked.
    OpenLightbox(usize),
    CloseLightbox,
    LightboxNext,
    LightboxPrevious,

    /// Play/pause toggle for the background music.
    TogglePlayback,
    /// A specific playlist track was picked (pins it for repeat).
    TrackSelected(usize),

    /// Result from prefetching a slide in the background.
    SlidePrefetched {
        source: SlideSource,
        result: Result<Vec<u8>, Error>,
    },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional explicit config file path.
    pub config_path: Option<PathBuf>,
    /// Optional gallery directory override (positional argument).
    pub images_dir: Option<PathBuf>,
}
