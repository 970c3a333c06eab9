//! Periodic spawning
//!
//! Three independent timers are polled once per frame against run time.
//! Nothing runs in the background: a timer only fires inside `tick`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rng::UniformSource;
use super::state::PATTERN_COUNT;
use super::viewport::Viewport;
use crate::consts::*;
use crate::sample_band;

/// A polled periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval: f64,
    next_due: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Start firing every `interval` from `now`, replacing any prior schedule
    pub fn arm(&mut self, now: f64) {
        self.cancel();
        self.next_due = Some(now + self.interval);
    }

    /// Stop firing. Safe on a timer that was never armed.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Fire at most once if due.
    ///
    /// The next deadline stays on the original phase grid; periods missed
    /// during a long stall are skipped rather than replayed.
    pub fn poll(&mut self, now: f64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let periods_elapsed = ((now - due) / self.interval).floor();
        self.next_due = Some(due + (periods_elapsed + 1.0) * self.interval);
        true
    }
}

/// Which spawns fired this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnFlags {
    pub obstacle: bool,
    pub bonus: bool,
    pub terrain: bool,
}

/// The three spawn timers of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub obstacle: SpawnTimer,
    pub bonus: SpawnTimer,
    pub terrain: SpawnTimer,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            obstacle: SpawnTimer::new(OBSTACLE_INTERVAL),
            bonus: SpawnTimer::new(BONUS_INTERVAL),
            terrain: SpawnTimer::new(TERRAIN_INTERVAL),
        }
    }
}

impl SpawnScheduler {
    pub fn arm_all(&mut self, now: f64) {
        if self.is_armed() {
            log::debug!("Re-arming spawn timers at t={:.3}", now);
        }
        self.obstacle.arm(now);
        self.bonus.arm(now);
        self.terrain.arm(now);
    }

    pub fn cancel_all(&mut self) {
        self.obstacle.cancel();
        self.bonus.cancel();
        self.terrain.cancel();
    }

    /// True if any timer is armed
    pub fn is_armed(&self) -> bool {
        self.obstacle.is_armed() || self.bonus.is_armed() || self.terrain.is_armed()
    }

    pub fn poll(&mut self, now: f64) -> SpawnFlags {
        SpawnFlags {
            obstacle: self.obstacle.poll(now),
            bonus: self.bonus.poll(now),
            terrain: self.terrain.poll(now),
        }
    }
}

/// Where a new cloud or coin enters: just past the right edge, random height
pub fn drifter_spawn_position(
    flyer_x: f64,
    viewport: &Viewport,
    rng: &mut dyn UniformSource,
) -> DVec2 {
    let x = flyer_x + viewport.width() / 2.0 + DRIFTER_RADIUS;
    let y = sample_band(SPAWN_BAND_LOW, SPAWN_BAND_HIGH, rng.next_unit());
    DVec2::new(x, y)
}

/// Uniformly choose a 1-based dune pattern
pub fn pick_pattern(rng: &mut dyn UniformSource) -> u8 {
    let slot = (rng.next_unit() * PATTERN_COUNT as f64).floor();
    (slot.clamp(0.0, (PATTERN_COUNT - 1) as f64) as u8) + 1
}
