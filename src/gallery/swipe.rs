// SPDX-License-Identifier: MPL-2.0
//! Horizontal swipe recognition for slide navigation.
//!
//! Tracks a single pointer gesture from press to release. A release whose
//! horizontal travel reaches the threshold maps to one navigation step:
//! dragging left advances, dragging right goes back.

/// Default minimum horizontal travel, in logical pixels, for a gesture to
/// count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Minimum accepted threshold.
pub const MIN_SWIPE_THRESHOLD: f32 = 10.0;

/// Maximum accepted threshold.
pub const MAX_SWIPE_THRESHOLD: f32 = 200.0;

/// Navigation produced by a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Travel stayed below the threshold; no navigation.
    None,
    /// Dragged left past the threshold; advance one slide.
    Next,
    /// Dragged right past the threshold; go back one slide.
    Previous,
}

/// Tracks one horizontal drag gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    origin: Option<f32>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    /// Creates a tracker with the given threshold, clamped to the accepted
    /// range.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            origin: None,
            threshold: threshold.clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD),
        }
    }

    /// Returns the effective threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Checks whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Starts a gesture at the given horizontal position.
    ///
    /// Starting while a gesture is active restarts it from the new origin.
    pub fn begin(&mut self, x: f32) {
        self.origin = Some(x);
    }

    /// Abandons the gesture without producing a navigation step.
    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Completes the gesture at the given position and returns the
    /// resulting navigation, if any.
    ///
    /// A release without a matching [`SwipeTracker::begin`] yields
    /// [`SwipeOutcome::None`].
    pub fn end(&mut self, x: f32) -> SwipeOutcome {
        let Some(origin) = self.origin.take() else {
            return SwipeOutcome::None;
        };

        let delta = x - origin;
        if delta <= -self.threshold {
            SwipeOutcome::Next
        } else if delta >= self.threshold {
            SwipeOutcome::Previous
        } else {
            SwipeOutcome::None
        }
    }
}
