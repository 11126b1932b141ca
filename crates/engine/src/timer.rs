//! Fixed-cadence gravity timer.
//!
//! The caller passes `now` explicitly so the loop and tests share one clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct GravityTimer {
    interval: Duration,
    last_step: Instant,
}

impl GravityTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_step: now,
        }
    }

    /// Time left until the next step (zero when overdue)
    pub fn time_until(&self, now: Instant) -> Duration {
        self.interval
            .checked_sub(now.saturating_duration_since(self.last_step))
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_step) >= self.interval
    }

    /// Consume a due step. Returns false (and keeps waiting) when not due.
    ///
    /// Overdue steps are not replayed: the next one is `interval` after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last_step = now;
        true
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_step = now;
    }
}
