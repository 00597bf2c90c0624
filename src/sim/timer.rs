//! Cancellable timers for the single-threaded game loop
//!
//! Nothing here talks to a real clock. The host feeds elapsed time in, which
//! keeps runs reproducible and lets `stop()` cancel everything by dropping
//! the schedule.

use std::time::Duration;

/// Fixed-delay one-shot timer. The owner reschedules it after each firing.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    /// Time left until the next firing, `None` when cancelled
    remaining: Option<Duration>,
}

impl SpawnTimer {
    /// Arm the timer, replacing any pending schedule
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advance by `elapsed`. Returns true (and disarms) when the delay runs out.
    pub fn poll(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(left) if elapsed >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - elapsed);
                false
            }
            None => false,
        }
    }
}

/// Turns host timestamps into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    armed: bool,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: None,
            armed: false,
            max_dt,
        }
    }

    /// Start accepting frames. The first frame after arming yields Δt = 0.
    pub fn arm(&mut self) {
        self.armed = true;
        self.last = None;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.last = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Δt in seconds since the previous frame, clamped to `max_dt`.
    /// `None` while cancelled. Timestamps going backwards count as zero.
    pub fn tick(&mut self, now_secs: f64) -> Option<f32> {
        if !self.armed {
            return None;
        }
        let dt = match self.last {
            Some(last) => ((now_secs - last).max(0.0) as f32).min(self.max_dt),
            None => 0.0,
        };
        self.last = Some(now_secs);
        Some(dt)
    }
}
