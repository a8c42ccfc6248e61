// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Event Defaults
// ==========================================================================

/// Default ceremony target instant, naive local time.
pub const DEFAULT_TARGET_DATETIME: &str = "2026-01-03T11:00:00";

/// Default invitation title shown above the countdown.
pub const DEFAULT_EVENT_TITLE: &str = "Counting Down to the Big Day";

// ==========================================================================
// Slider Defaults
// ==========================================================================

/// Default auto-advance period for the inline slider (in seconds).
pub const DEFAULT_SLIDE_INTERVAL_SECS: u32 = 4;

/// Minimum slide interval (in seconds).
pub const MIN_SLIDE_INTERVAL_SECS: u32 = 1;

/// Maximum slide interval (in seconds).
pub const MAX_SLIDE_INTERVAL_SECS: u32 = 30;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Default prefetch cache size in megabytes.
pub const DEFAULT_PREFETCH_CACHE_MB: u32 = 32;

// ==========================================================================
// Audio Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;
