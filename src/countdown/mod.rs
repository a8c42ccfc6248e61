// SPDX-License-Identifier: MPL-2.0
//! Countdown engine for the ceremony date.
//!
//! This module owns the remaining-time state that drives the flip-card
//! display. Every tick recomputes the remaining duration from the fixed
//! target and the supplied wall-clock instant, so the value can never drift
//! or act on a stale snapshot. The pre-tick value is kept alongside the
//! current one so the presentation layer can play a flip transition on
//! exactly the units that changed.

use chrono::NaiveDateTime;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time until the target, decomposed into display units.
///
/// All fields are non-negative; once the target has passed the value is
/// all-zero and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    /// The all-zero value shown at and after the target instant.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a millisecond delta into whole days, hours, minutes and
    /// seconds via floor division, each unit operating on the remainder of
    /// the previous one. Non-positive deltas clamp to [`TimeLeft::ZERO`].
    #[must_use]
    pub fn from_millis(delta_ms: i64) -> Self {
        if delta_ms <= 0 {
            return Self::ZERO;
        }

        Self {
            days: (delta_ms / MS_PER_DAY) as u64,
            hours: ((delta_ms % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((delta_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((delta_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    /// Returns the decomposition recombined into whole seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Checks whether every unit is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Per-unit change snapshot between the previous and current tick.
///
/// The view diffs units independently to decide which flip cards animate.
// Allow excessive bools: read-only UI snapshot with one orthogonal flag per
// display unit.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitChanges {
    pub days: bool,
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
}

impl UnitChanges {
    /// Checks whether any unit changed on the last tick.
    #[must_use]
    pub fn any(&self) -> bool {
        self.days || self.hours || self.minutes || self.seconds
    }
}

/// Live countdown to a fixed target instant.
///
/// The target is captured once at construction and never changes for the
/// session. `tick` stores the pre-tick value as `previous` before
/// recomputing `current`, so the previous/current pair is always a real
/// consecutive observation and never a stale closure capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    target: NaiveDateTime,
    current: TimeLeft,
    previous: TimeLeft,
}

impl Countdown {
    /// Creates a countdown and computes the initial remaining time
    /// synchronously, so the first render is never a placeholder zero state.
    #[must_use]
    pub fn new(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let current = Self::remaining_at(target, now);
        Self {
            target,
            current,
            previous: current,
        }
    }

    /// Recomputes the remaining time for the supplied instant.
    ///
    /// Ticking at or past the target is idempotent: the value clamps to
    /// all-zero and stays there.
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.previous = self.current;
        self.current = Self::remaining_at(self.target, now);
    }

    /// Returns the target instant.
    #[must_use]
    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    /// Returns the remaining time as of the last tick.
    #[must_use]
    pub fn current(&self) -> TimeLeft {
        self.current
    }

    /// Returns the remaining time as of the tick before the last one.
    #[must_use]
    pub fn previous(&self) -> TimeLeft {
        self.previous
    }

    /// Checks whether the target instant has been reached.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.current.is_zero()
    }

    /// Returns which display units changed on the last tick.
    #[must_use]
    pub fn changes(&self) -> UnitChanges {
        UnitChanges {
            days: self.previous.days != self.current.days,
            hours: self.previous.hours != self.current.hours,
            minutes: self.previous.minutes != self.current.minutes,
            seconds: self.previous.seconds != self.current.seconds,
        }
    }

    fn remaining_at(target: NaiveDateTime, now: NaiveDateTime) -> TimeLeft {
        TimeLeft::from_millis(target.signed_duration_since(now).num_milliseconds())
    }
}
