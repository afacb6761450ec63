//! Simulated time.
//!
//! The clock only moves when the embedding loop says so. Release times of
//! queued responses are compared against it; nothing ever sleeps.

use crate::fixed::Millis;

/// Caller-advanced monotonic clock, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    now: Millis,
}

impl SimClock {
    /// Create a clock starting at 0.
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move the clock to `now`. Earlier values are ignored so time never
    /// runs backwards.
    pub fn advance_to(&mut self, now: Millis) -> Millis {
        self.now = self.now.max(now);
        self.now
    }

    /// Move the clock forward by `dt`.
    pub fn advance_by(&mut self, dt: Millis) -> Millis {
        self.now = self.now.saturating_add(dt);
        self.now
    }

    /// The instant `delay` from now.
    pub fn deadline(&self, delay: Millis) -> Millis {
        self.now.saturating_add(delay)
    }
}
