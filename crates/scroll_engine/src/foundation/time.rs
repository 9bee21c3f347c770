//! Time management utilities

use std::time::{Duration, Instant};

/// Elapsed-time source for the per-frame `render(time)` calls
///
/// Layout speeds are expressed as "time units per radian", and the default
/// speeds assume milliseconds, so the clock reports milliseconds. Times are
/// `f64` so frame spacing stays exact over days of uptime.
pub struct FrameClock {
    start: Instant,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_count: 0,
        }
    }

    /// Advance the frame counter and return elapsed milliseconds
    pub fn tick(&mut self) -> f64 {
        self.frame_count += 1;
        self.elapsed_millis()
    }

    /// Elapsed time since creation
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time since creation in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-step time source for headless or deterministic playback
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step_millis: f64,
    frame: u64,
}

impl FixedStepClock {
    /// Create a clock advancing `step_millis` per frame, starting at zero
    pub fn new(step_millis: f64) -> Self {
        Self {
            step_millis,
            frame: 0,
        }
    }

    /// Return the current time and advance by one step
    pub fn tick(&mut self) -> f64 {
        let time = self.frame as f64 * self.step_millis;
        self.frame += 1;
        time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
