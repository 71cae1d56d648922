//! Wall-clock stopwatch for timing a whole run.

use std::fmt;

use crate::clock::{Clock, SystemClock};
use crate::format::format_duration;

/// Measures the time between `start()` and `stop()`.
///
/// `Display` renders the elapsed time in the tracker's duration layout;
/// while running, it shows the elapsed time so far.
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    t0: Option<f64>,
    t1: Option<f64>,
}

impl Stopwatch<SystemClock> {
    /// Stopwatch that is already running.
    pub fn started() -> Self {
        let mut watch = Self::with_clock(SystemClock::new());
        watch.start();
        watch
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            t0: None,
            t1: None,
        }
    }

    /// Start (or restart) the measurement.
    pub fn start(&mut self) {
        self.t0 = Some(self.clock.now());
        self.t1 = None;
    }

    pub fn stop(&mut self) {
        self.t1 = Some(self.clock.now());
    }

    /// Seconds between start and stop, or start and now while running.
    /// `None` before the first `start()`.
    pub fn elapsed(&self) -> Option<f64> {
        let t0 = self.t0?;
        let t1 = self.t1.unwrap_or_else(|| self.clock.now());
        Some(t1 - t0)
    }
}

impl<C: Clock> fmt::Display for Stopwatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elapsed() {
            Some(secs) => write!(f, "{}", format_duration(secs)),
            None => write!(f, "(not started)"),
        }
    }
}
