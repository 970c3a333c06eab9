//! Time bookkeeping
//!
//! The host owns the real clock. `RunClock` turns the host's elapsed time
//! into run-relative time; `FrameClock` is a synthetic host clock for the
//! headless runner and tests.

use serde::{Deserialize, Serialize};

/// Run-relative time derived from the host's monotonic elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunClock {
    /// Host time at which the current run began
    started_at: f64,
    /// Latest host time seen (for monotonicity)
    last_elapsed: f64,
    /// Latest frame delta reported by the host
    last_delta: f64,
    /// Frames simulated in the current run
    frames: u64,
    /// Run time held while no run is in progress
    frozen_at: Option<f64>,
}

impl Default for RunClock {
    fn default() -> Self {
        Self {
            started_at: 0.0,
            last_elapsed: 0.0,
            last_delta: 0.0,
            frames: 0,
            frozen_at: Some(0.0),
        }
    }
}

impl RunClock {
    /// Record a host timestamp, refusing to go backwards
    pub fn observe(&mut self, elapsed: f64, delta: f64) -> f64 {
        if elapsed.is_finite() && elapsed >= self.last_elapsed {
            self.last_elapsed = elapsed;
        } else {
            log::warn!(
                "Host clock went backwards or is invalid ({} < {}), holding",
                elapsed,
                self.last_elapsed
            );
        }
        self.last_delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.last_elapsed
    }

    /// Begin a new run at the most recently observed host time
    pub fn start_run(&mut self) {
        self.started_at = self.last_elapsed;
        self.frames = 0;
        self.frozen_at = None;
    }

    /// Stop the run clock; `run_time` holds its current value until the
    /// next `start_run`
    pub fn freeze(&mut self) {
        if self.frozen_at.is_none() {
            self.frozen_at = Some(self.last_elapsed - self.started_at);
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Seconds since the current run began (held once frozen)
    #[inline]
    pub fn run_time(&self) -> f64 {
        self.frozen_at.unwrap_or(self.last_elapsed - self.started_at)
    }

    pub fn count_frame(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }
}

/// Synthetic monotonic clock driven by explicit frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds, returning `(elapsed, delta)` for the frame
    pub fn advance(&mut self, delta: f64) -> (f64, f64) {
        let delta = delta.max(0.0);
        self.elapsed += delta;
        (self.elapsed, delta)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_time_is_relative_to_start() {
        let mut clock = RunClock::default();
        clock.observe(5.0, 0.016);
        clock.start_run();
        assert_eq!(clock.run_time(), 0.0);
        clock.observe(7.5, 2.5);
        assert_eq!(clock.run_time(), 2.5);
    }

    #[test]
    fn test_frozen_clock_holds_run_time() {
        let mut clock = RunClock::default();
        // Nothing counts before the first run
        clock.observe(4.0, 0.1);
        assert_eq!(clock.run_time(), 0.0);

        clock.start_run();
        clock.observe(9.0, 0.1);
        clock.freeze();
        clock.observe(30.0, 0.1);
        assert_eq!(clock.run_time(), 5.0);

        // A second freeze keeps the first value
        clock.freeze();
        assert_eq!(clock.run_time(), 5.0);

        clock.start_run();
        assert!(!clock.is_frozen());
        clock.observe(31.0, 0.1);
        assert_eq!(clock.run_time(), 1.0);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut clock = RunClock::default();
        clock.observe(3.0, 0.1);
        assert_eq!(clock.observe(2.0, 0.1), 3.0);
        assert_eq!(clock.observe(f64::NAN, 0.1), 3.0);
        assert_eq!(clock.observe(3.5, f64::INFINITY), 3.5);
        assert_eq!(clock.last_delta(), 0.0);
    }

    #[test]
    fn test_frame_clock_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        let (elapsed, delta) = clock.advance(0.25);
        assert_eq!(elapsed, 0.75);
        assert_eq!(delta, 0.25);
        // Negative deltas are treated as zero
        assert_eq!(clock.advance(-1.0), (0.75, 0.0));
    }
}
