//! Session state and core simulation types
//!
//! Everything a run mutates lives in `Session`; restarting resets it in place.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::clock::RunClock;
use super::collision::Aabb;
use super::registry::EntityRegistry;
use super::spawn::SpawnScheduler;
use super::viewport::{AspectTracker, Viewport};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title prompt, nothing simulates
    #[default]
    Intro,
    /// Full per-frame pipeline runs
    Playing,
    /// Run ended, simulation frozen until restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Flew above the playable band
    Ceiling,
    /// Sank below the playable band
    Floor,
    /// Hit a cloud
    Cloud { id: u32 },
}

/// Gameplay events for the host (audio, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { run: u32 },
    CoinCollected { id: u32, score: u32 },
    RunEnded { cause: CrashCause, score: u32, run_time: f64 },
}

/// The player's plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: DVec2,
    pub radius: f64,
}

impl Default for Flyer {
    fn default() -> Self {
        Self {
            pos: DVec2::ZERO,
            radius: FLYER_RADIUS,
        }
    }
}

impl Flyer {
    /// Lock horizontal position to run time.
    ///
    /// `x` is re-synchronised to the clock every frame instead of being
    /// accumulated from deltas, so it cannot drift.
    pub fn update_horizontal(&mut self, run_time: f64) {
        self.pos.x = run_time;
    }

    /// Apply one frame of vertical motion, returning the new height
    pub fn update_vertical(&mut self, boost: bool) -> f64 {
        if boost {
            self.pos.y += BOOST_IMPULSE;
        } else {
            self.pos.y -= DESCENT_STEP;
        }
        self.pos.y
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.radius)
    }
}

/// A cloud or coin drifting toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drifter {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
}

impl Drifter {
    pub fn new(id: u32, pos: DVec2) -> Self {
        Self {
            id,
            pos,
            radius: DRIFTER_RADIUS,
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.pos.x + self.radius
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.radius)
    }
}

/// Dune height offsets, indexed by `pattern_id - 1`
pub const DUNE_PATTERNS: [[f64; 3]; 10] = [
    [0.0, 1.2, 0.4],
    [0.8, 0.0, 1.5],
    [1.6, 0.9, 0.0],
    [0.3, 2.0, 0.7],
    [1.1, 0.2, 1.9],
    [0.0, 0.6, 2.2],
    [2.4, 1.0, 0.3],
    [0.5, 1.7, 1.2],
    [1.9, 0.4, 0.9],
    [0.9, 2.3, 0.1],
];

/// Number of selectable dune patterns
pub const PATTERN_COUNT: u8 = DUNE_PATTERNS.len() as u8;

/// A stretch of ground with dunes and scattered rocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSegment {
    pub id: u32,
    pub origin_x: f64,
    /// 1-based pattern selector
    pub pattern_id: u8,
    pub dune_offsets: [f64; 3],
}

impl TerrainSegment {
    pub fn new(id: u32, origin_x: f64, pattern_id: u8) -> Self {
        let pattern_id = pattern_id.clamp(1, PATTERN_COUNT);
        Self {
            id,
            origin_x,
            pattern_id,
            dune_offsets: DUNE_PATTERNS[(pattern_id - 1) as usize],
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.origin_x + TERRAIN_LENGTH
    }

    /// Dune crests, evenly spaced along the segment
    pub fn dune_positions(&self) -> [DVec2; 3] {
        let spacing = TERRAIN_LENGTH / 3.0;
        std::array::from_fn(|k| {
            DVec2::new(
                self.origin_x + spacing * (k as f64 + 0.5),
                GROUND_Y + self.dune_offsets[k],
            )
        })
    }

    /// Decorative rocks; count and placement follow from the pattern
    pub fn decor_positions(&self) -> Vec<DVec2> {
        let p = self.pattern_id as u32;
        let count = p % 3 + 1;
        (0..count)
            .map(|k| {
                let slot = (p * 7 + k * 11) % TERRAIN_LENGTH as u32;
                DVec2::new(
                    self.origin_x + slot as f64 + 0.5,
                    GROUND_Y + self.dune_offsets[(k % 3) as usize] * 0.5,
                )
            })
            .collect()
    }
}

/// Coin counter for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    coins: u32,
}

impl ScoreTracker {
    /// Count one collected coin, returning the new total
    pub fn award_coin(&mut self) -> u32 {
        self.coins = self.coins.saturating_add(1);
        self.coins
    }

    pub fn value(&self) -> u32 {
        self.coins
    }

    pub fn reset(&mut self) {
        self.coins = 0;
    }
}

/// Complete per-session state, owned by the game loop
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub flyer: Flyer,
    pub registry: EntityRegistry,
    pub scheduler: SpawnScheduler,
    pub score: ScoreTracker,
    pub viewport: Viewport,
    pub aspect: AspectTracker,
    pub clock: RunClock,
    /// Runs started since the session was created
    pub runs: u32,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// One-shot boost waiting for the next Playing frame
    boost_pending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything for a fresh run and enter Playing.
    ///
    /// The registry is left with no terrain at all; the two opening
    /// segments are laid by the first Playing `tick`. A manifest captured
    /// between `restart` and that tick shows an empty ground. Calling this
    /// twice in a row leaves the same state as calling it once.
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.flyer.reset();
        self.score.reset();
        self.registry.clear();
        self.boost_pending = false;
        self.clock.start_run();
        self.viewport = Viewport::compute(self.flyer.pos.x, self.aspect.current());
        self.scheduler.arm_all(self.clock.run_time());
        self.phase = GamePhase::Playing;
    }

    /// Queue a boost for the next Playing frame (edge-triggered)
    pub fn request_boost(&mut self) {
        self.boost_pending = true;
    }

    /// Consume the pending boost, if any
    pub fn take_boost(&mut self) -> bool {
        std::mem::take(&mut self.boost_pending)
    }

    pub fn boost_pending(&self) -> bool {
        self.boost_pending
    }

    /// Hand accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
