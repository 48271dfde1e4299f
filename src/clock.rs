use std::time::{Duration, Instant};

/// Throttles frame callbacks to the target rate.
///
/// A callback arriving sooner than half the target interval after the last
/// accepted one is skipped; the caller just tries again on its next wakeup.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval_ms: f64) -> Self {
        FrameClock {
            interval: Duration::from_secs_f64(interval_ms / 1000.0),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Marks `now` as the previous tick, so the first real tick measures its
    /// delta from the start of the run.
    pub fn begin(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn stop(&mut self) {
        self.last = None;
    }

    /// Milliseconds since the last accepted tick, or `None` when this
    /// callback is too early (or the clock is stopped).
    pub fn ready(&mut self, now: Instant) -> Option<f64> {
        let last = self.last?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval / 2 {
            return None;
        }
        self.last = Some(now);
        Some(elapsed.as_secs_f64() * 1000.0)
    }

    /// When the next tick is due.
    pub fn next_due(&self, now: Instant) -> Instant {
        match self.last {
            Some(last) => (last + self.interval).max(now),
            None => now + self.interval,
        }
    }
}
