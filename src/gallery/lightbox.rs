// SPDX-License-Identifier: MPL-2.0
//! Full-screen lightbox state machine.
//!
//! The lightbox is either `Closed` or open on a single slide index. While
//! open, page scrolling behind the overlay is suspended through a scoped
//! hold on a shared [`ScrollState`]; the hold is released exactly once —
//! on `close`, or when the lightbox is dropped while still open.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared scroll flag for the page behind overlays.
///
/// Cloning shares the underlying flag. Scrolling is enabled by default.
#[derive(Debug, Clone)]
pub struct ScrollState(Arc<AtomicBool>);

impl ScrollState {
    /// Creates a new state with scrolling enabled.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Checks whether page scrolling is currently enabled.
    #[must_use]
    pub fn is_scroll_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Suspends scrolling until the returned hold is dropped.
    ///
    /// Only one hold is expected at a time (a single lightbox owns the
    /// overlay); the hold restores the flag on drop.
    #[must_use]
    pub fn hold(&self) -> ScrollHold {
        self.0.store(false, Ordering::Relaxed);
        ScrollHold {
            state: self.clone(),
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped suspension of page scrolling.
///
/// Dropping the hold re-enables scrolling, so teardown while the lightbox
/// is open can never leave the page permanently unscrollable.
#[derive(Debug)]
pub struct ScrollHold {
    state: ScrollState,
}

impl Drop for ScrollHold {
    fn drop(&mut self) {
        self.state.0.store(true, Ordering::Relaxed);
    }
}

/// Modal viewer over a fixed list of `slide_count` images.
///
/// The slide list itself lives in the gallery; the lightbox only tracks
/// which index is presented and owns the scroll hold for the overlay.
#[derive(Debug)]
pub struct Lightbox {
    slide_count: usize,
    open_index: Option<usize>,
    scroll: ScrollState,
    hold: Option<ScrollHold>,
}

impl Lightbox {
    /// Creates a closed lightbox over `slide_count` slides.
    #[must_use]
    pub fn new(slide_count: usize, scroll: ScrollState) -> Self {
        Self {
            slide_count,
            open_index: None,
            scroll,
            hold: None,
        }
    }

    /// Checks whether the lightbox is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    /// Returns the presented slide index while open.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.open_index
    }

    /// Opens the lightbox on the given slide and suspends page scrolling.
    ///
    /// Out-of-range indices are rejected as a no-op and `false` is
    /// returned. Opening while already open jumps to the new index without
    /// re-acquiring the scroll hold.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.slide_count {
            return false;
        }

        self.open_index = Some(index);
        if self.hold.is_none() {
            self.hold = Some(self.scroll.hold());
        }
        true
    }

    /// Closes the lightbox and restores page scrolling.
    ///
    /// Closing an already-closed lightbox is a no-op.
    pub fn close(&mut self) {
        self.open_index = None;
        self.hold = None;
    }

    /// Advances to the next slide, wrapping around. Valid only while open.
    pub fn next(&mut self) {
        if let Some(index) = self.open_index {
            self.open_index = Some((index + 1) % self.slide_count);
        }
    }

    /// Steps back to the previous slide, wrapping around. Valid only while
    /// open.
    pub fn previous(&mut self) {
        if let Some(index) = self.open_index {
            self.open_index = Some((index + self.slide_count - 1) % self.slide_count);
        }
    }

    /// Jumps to the given slide while open.
    ///
    /// Out-of-range indices are rejected as a no-op; calls while closed are
    /// ignored (use [`Lightbox::open`] to open on a specific slide).
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.open_index.is_none() || index >= self.slide_count {
            return false;
        }
        self.open_index = Some(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lightbox_is_closed_with_scroll_enabled() {
        let scroll = ScrollState::new();
        let lightbox = Lightbox::new(5, scroll.clone());

        assert!(!lightbox.is_open());
        assert_eq!(lightbox.current(), None);
        assert!(scroll.is_scroll_enabled());
    }

    #[test]
    fn open_suspends_scroll_and_close_restores_it() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(5, scroll.clone());

        assert!(lightbox.open(2));
        assert_eq!(lightbox.current(), Some(2));
        assert!(!scroll.is_scroll_enabled());

        lightbox.close();
        assert!(!lightbox.is_open());
        assert!(scroll.is_scroll_enabled());
    }

    #[test]
    fn open_rejects_out_of_range_index() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(3, scroll.clone());

        assert!(!lightbox.open(3));
        assert!(!lightbox.is_open());
        assert!(scroll.is_scroll_enabled());
    }

    #[test]
    fn drop_while_open_restores_scroll() {
        let scroll = ScrollState::new();
        {
            let mut lightbox = Lightbox::new(4, scroll.clone());
            assert!(lightbox.open(0));
            assert!(!scroll.is_scroll_enabled());
        }
        assert!(scroll.is_scroll_enabled());
    }

    #[test]
    fn next_and_previous_wrap_while_open() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(5, scroll);

        assert!(lightbox.open(4));
        lightbox.next();
        assert_eq!(lightbox.current(), Some(0));

        lightbox.previous();
        assert_eq!(lightbox.current(), Some(4));
    }

    #[test]
    fn navigation_while_closed_is_ignored() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(5, scroll);

        lightbox.next();
        lightbox.previous();
        assert!(!lightbox.go_to(1));
        assert_eq!(lightbox.current(), None);
    }

    #[test]
    fn reopen_on_another_index_keeps_single_hold() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(5, scroll.clone());

        assert!(lightbox.open(1));
        assert!(lightbox.open(3));
        assert_eq!(lightbox.current(), Some(3));
        assert!(!scroll.is_scroll_enabled());

        lightbox.close();
        assert!(scroll.is_scroll_enabled());
    }

    #[test]
    fn go_to_rejects_out_of_range_while_open() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(3, scroll);

        assert!(lightbox.open(0));
        assert!(!lightbox.go_to(7));
        assert_eq!(lightbox.current(), Some(0));
    }

    #[test]
    fn repeated_close_is_idempotent() {
        let scroll = ScrollState::new();
        let mut lightbox = Lightbox::new(2, scroll.clone());

        assert!(lightbox.open(1));
        lightbox.close();
        lightbox.close();
        assert!(scroll.is_scroll_enabled());
    }
}
