// SPDX-License-Identifier: MPL-2.0
//! Gallery and slider navigation state.
//!
//! Two independent presentations share the same wraparound cursor logic:
//! the inline auto-advancing slider and the thumbnail gallery with its
//! full-screen lightbox. Everything here is plain in-memory state; the
//! timers that drive auto-advance live in the application shell as Iced
//! subscriptions so they die with the view.

pub mod carousel;
pub mod lightbox;
pub mod prefetch;
pub mod slider;
pub mod swipe;

pub use carousel::Carousel;
pub use lightbox::{Lightbox, ScrollState};
pub use slider::{SlideInterval, Slider};
pub use swipe::{SwipeOutcome, SwipeTracker};
