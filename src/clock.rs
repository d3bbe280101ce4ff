//! Millisecond time source and wrap-safe deadlines.
//!
//! The controller never sleeps. It reads the clock on every call and compares
//! the reading against a [`Deadline`]. Readings are `u32` milliseconds, so a
//! clock is free to wrap around (an Arduino-style `millis()` wraps after about
//! 49.7 days) as long as no single span exceeds [`Deadline::MAX_SPAN_MS`].

use embassy_time::{Duration, Instant};

/// Monotonic millisecond clock
///
/// Implement this trait to plug in a platform timer.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch.
    ///
    /// Must not block. The value may wrap around `u32::MAX`.
    fn now_millis(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// Clock backed by the `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_millis(&self) -> u32 {
        // Truncation is the wraparound
        Instant::now().as_millis() as u32
    }
}

/// Absolute point in time, in clock milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline(u32);

impl Deadline {
    /// Longest span a deadline can be scheduled ahead of `now`.
    ///
    /// Half of the clock range: any later point would be indistinguishable
    /// from one in the past.
    pub const MAX_SPAN_MS: u32 = i32::MAX as u32;

    /// Deadline that is due at `now`
    pub const fn at(now: u32) -> Self {
        Self(now)
    }

    /// Deadline `span` after `now`
    ///
    /// Spans longer than [`Self::MAX_SPAN_MS`] saturate.
    pub fn after(now: u32, span: Duration) -> Self {
        let span_ms = u32::try_from(span.as_millis())
            .unwrap_or(u32::MAX)
            .min(Self::MAX_SPAN_MS);
        Self(now.wrapping_add(span_ms))
    }

    /// Raw clock value of the deadline
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Check if `now` is at or past the deadline
    pub const fn is_due(self, now: u32) -> bool {
        now.wrapping_sub(self.0) <= Self::MAX_SPAN_MS
    }

    /// Time left until the deadline, zero once due
    pub fn remaining(self, now: u32) -> Duration {
        if self.is_due(now) {
            Duration::from_millis(0)
        } else {
            Duration::from_millis(u64::from(self.0.wrapping_sub(now)))
        }
    }
}
