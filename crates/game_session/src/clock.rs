//! Per-side countdown clock with per-move increment.
//!
//! The clock is tick-driven: the host delivers one `tick()` per fixed period
//! ([`TICK`]) and the clock decrements whichever side it is currently
//! running for. It stays idle until the first committed move so neither
//! side's time depletes before the game begins.

use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed period represented by one `tick()` call.
pub const TICK: Duration = Duration::from_secs(1);

/// Time control settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    /// Initial time in seconds
    pub initial_time: u64,
    /// Increment per move in seconds
    pub increment: u64,
}

impl TimeControl {
    pub fn new(minutes: u64, increment_secs: u64) -> Self {
        Self {
            initial_time: minutes * 60,
            increment: increment_secs,
        }
    }

    /// Base time in seconds rather than minutes.
    pub fn from_seconds(base_secs: u64, increment_secs: u64) -> Self {
        Self {
            initial_time: base_secs,
            increment: increment_secs,
        }
    }

    /// Unlimited time
    pub fn unlimited() -> Self {
        Self {
            initial_time: 0,
            increment: 0,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.initial_time == 0
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(10, 5) // Rapid 10+5
    }
}

impl std::fmt::Display for TimeControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unlimited() {
            write!(f, "Unlimited")
        } else {
            write!(f, "{}+{}", self.initial_time / 60, self.increment)
        }
    }
}

/// Countdown clock for both players.
#[derive(Debug, Clone)]
pub struct Clock {
    time_control: TimeControl,
    white_ms: u64,
    black_ms: u64,
    /// Which side's clock is running; at most one at a time.
    running_for: Option<Side>,
    enabled: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TimeControl::default())
    }
}

impl Clock {
    pub fn new(time_control: TimeControl) -> Self {
        let initial_ms = time_control.initial_time * 1000;
        Self {
            time_control,
            white_ms: initial_ms,
            black_ms: initial_ms,
            running_for: None,
            enabled: !time_control.is_unlimited(),
        }
    }

    pub fn time_control(&self) -> TimeControl {
        self.time_control
    }

    /// Run the clock for `side`, stopping the other side implicitly.
    pub fn start(&mut self, side: Side) {
        if self.enabled {
            self.running_for = Some(side);
        }
    }

    /// Stop ticking entirely. Idempotent.
    pub fn stop(&mut self) {
        self.running_for = None;
    }

    pub fn running_for(&self) -> Option<Side> {
        self.running_for
    }

    /// Credit the per-move increment to the side that just moved.
    /// Applied whether or not the clock is currently running.
    pub fn credit_increment(&mut self, mover: Side) {
        if !self.enabled || self.time_control.increment == 0 {
            return;
        }
        let inc = self.time_control.increment * 1000;
        match mover {
            Side::White => self.white_ms += inc,
            Side::Black => self.black_ms += inc,
        }
    }

    /// Advance by one fixed period. Returns the side whose time just
    /// reached zero, if any; the clock stops running when that happens.
    pub fn tick(&mut self) -> Option<Side> {
        let side = self.running_for?;
        if !self.enabled {
            return None;
        }
        let step = TICK.as_millis() as u64;
        let remaining = match side {
            Side::White => &mut self.white_ms,
            Side::Black => &mut self.black_ms,
        };
        *remaining = remaining.saturating_sub(step);
        if *remaining == 0 {
            self.running_for = None;
            Some(side)
        } else {
            None
        }
    }

    pub fn remaining(&self, side: Side) -> Duration {
        let ms = match side {
            Side::White => self.white_ms,
            Side::Black => self.black_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn is_exhausted(&self, side: Side) -> bool {
        self.enabled && self.remaining(side).is_zero()
    }

    /// Format time as MM:SS, with tenths under ten seconds.
    pub fn format_time(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let mins = total_secs / 60;
        let secs = total_secs % 60;

        if duration.as_millis() < 10_000 {
            let tenths = (duration.as_millis() % 1000) / 100;
            format!("{}:{:02}.{}", mins, secs, tenths)
        } else {
            format!("{}:{:02}", mins, secs)
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
