//! Session countdown
//!
//! Driven by a fixed-period interval, independent of the frame rate.

use serde::{Deserialize, Serialize};

/// Remaining time below this snaps to zero (absorbs drift from repeated steps)
const EXPIRY_EPSILON: f64 = 1e-6;

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// Time remains (or the countdown already expired earlier)
    Running,
    /// The countdown reached zero on this tick. Raised once per session.
    Expired,
}

/// Monotonic countdown clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f64,
    expired: bool,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: f64::from(seconds.max(0.0)),
            expired: false,
        }
    }

    /// Remove `step` seconds while time remains
    pub fn tick(&mut self, step: f32) -> TimerSignal {
        if self.expired {
            return TimerSignal::Running;
        }
        if self.remaining > 0.0 {
            self.remaining -= f64::from(step.max(0.0));
        }
        if self.remaining <= EXPIRY_EPSILON {
            self.remaining = 0.0;
            self.expired = true;
            return TimerSignal::Expired;
        }
        TimerSignal::Running
    }

    pub fn remaining(&self) -> f32 {
        self.remaining as f32
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}
