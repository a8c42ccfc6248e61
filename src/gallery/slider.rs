// SPDX-License-Identifier: MPL-2.0
//! Inline auto-advancing slider state.
//!
//! The slider shows its slides in place (no modal) and steps forward on a
//! fixed cadence while the pointer is away. Hovering or dragging pauses
//! auto-advance; manual navigation works regardless of the pause flag.
//! The repeating timer itself is an application subscription that is
//! withheld while paused and dies with the view.

use crate::config::{DEFAULT_SLIDE_INTERVAL_SECS, MAX_SLIDE_INTERVAL_SECS, MIN_SLIDE_INTERVAL_SECS};
use crate::gallery::Carousel;

/// Auto-advance period in seconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–30 seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideInterval(u32);

impl SlideInterval {
    /// Creates a new interval value, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_SLIDE_INTERVAL_SECS, MAX_SLIDE_INTERVAL_SECS))
    }

    /// Returns the value as u32 seconds.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the interval as a Duration.
    #[must_use]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.0))
    }
}

impl Default for SlideInterval {
    fn default() -> Self {
        Self(DEFAULT_SLIDE_INTERVAL_SECS)
    }
}

/// Inline slider with pause-aware auto-advance.
#[derive(Debug, Clone)]
pub struct Slider {
    carousel: Carousel,
    interval: SlideInterval,
    paused: bool,
}

impl Slider {
    /// Creates a slider positioned on the first slide, unpaused.
    #[must_use]
    pub fn new(carousel: Carousel, interval: SlideInterval) -> Self {
        Self {
            carousel,
            interval,
            paused: false,
        }
    }

    /// Returns the auto-advance period.
    #[must_use]
    pub fn interval(&self) -> SlideInterval {
        self.interval
    }

    /// Checks whether auto-advance is currently suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends or resumes auto-advance (pointer enter/leave, drag
    /// start/end).
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// One auto-advance tick: steps to the next slide unless paused.
    ///
    /// Returns whether the slider advanced.
    pub fn auto_advance(&mut self) -> bool {
        if self.paused || self.carousel.is_empty() {
            return false;
        }
        self.carousel.next();
        true
    }

    /// Manually advances one slide, wrapping around.
    pub fn next(&mut self) {
        self.carousel.next();
    }

    /// Manually steps back one slide, wrapping around.
    pub fn previous(&mut self) {
        self.carousel.previous();
    }

    /// Jumps to the given slide; out-of-range indices are rejected.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.carousel.go_to(index)
    }

    /// Returns the underlying carousel.
    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SlideSource;
    use std::path::PathBuf;

    fn slider_of(count: usize) -> Slider {
        let slides = (0..count)
            .map(|i| SlideSource::Local(PathBuf::from(format!("slide_{i}.jpg"))))
            .collect();
        Slider::new(Carousel::new(slides), SlideInterval::default())
    }

    #[test]
    fn interval_clamps_to_valid_range() {
        assert_eq!(SlideInterval::new(0).value(), MIN_SLIDE_INTERVAL_SECS);
        assert_eq!(SlideInterval::new(100).value(), MAX_SLIDE_INTERVAL_SECS);
        assert_eq!(
            SlideInterval::default().value(),
            DEFAULT_SLIDE_INTERVAL_SECS
        );
    }

    #[test]
    fn interval_converts_to_duration() {
        assert_eq!(
            SlideInterval::new(4).as_duration(),
            std::time::Duration::from_secs(4)
        );
    }

    #[test]
    fn k_ticks_advance_k_steps_modulo_len() {
        let mut slider = slider_of(5);

        for _ in 0..7 {
            assert!(slider.auto_advance());
        }
        assert_eq!(slider.carousel().current_index(), Some(7 % 5));
    }

    #[test]
    fn paused_slider_does_not_advance() {
        let mut slider = slider_of(5);
        slider.set_paused(true);

        assert!(!slider.auto_advance());
        assert!(!slider.auto_advance());
        assert_eq!(slider.carousel().current_index(), Some(0));
    }

    #[test]
    fn resuming_continues_from_current_slide() {
        let mut slider = slider_of(3);
        assert!(slider.auto_advance());

        slider.set_paused(true);
        assert!(!slider.auto_advance());

        slider.set_paused(false);
        assert!(slider.auto_advance());
        assert_eq!(slider.carousel().current_index(), Some(2));
    }

    #[test]
    fn manual_navigation_ignores_pause() {
        let mut slider = slider_of(3);
        slider.set_paused(true);

        slider.next();
        assert_eq!(slider.carousel().current_index(), Some(1));

        slider.previous();
        assert_eq!(slider.carousel().current_index(), Some(0));
    }

    #[test]
    fn empty_slider_never_advances() {
        let mut slider = Slider::new(Carousel::default(), SlideInterval::default());
        assert!(!slider.auto_advance());
    }
}
