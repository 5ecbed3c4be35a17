use std::time::{Duration, Instant};

/// Decides, once per frame, whether enough time has passed for a tick.
///
/// The caller supplies `now` so the gate can be driven by a fake clock in
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last_tick: Instant,
}

impl TickClock {
    pub fn new(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// True when at least `interval` has elapsed since the last tick.
    ///
    /// On true the reference point moves to `now`.
    pub fn should_tick(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_tick) >= interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }
}
