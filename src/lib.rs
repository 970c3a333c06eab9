//! Cloud Hopper - an endless side-scrolling flyer
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, spawning, collisions, game state)
//! - `settings`: Host configuration for the headless runner
//! - `highscores`: In-memory leaderboard of finished runs

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// These are fixed design parameters. Motion steps are applied once per
/// frame and are not scaled by the frame delta.
pub mod consts {
    /// Fixed vertical extent of the visible world
    pub const VIEW_TOP: f64 = 10.5;
    pub const VIEW_BOTTOM: f64 = -15.0;
    /// Playable band is tighter than the raw viewport (plane geometry, ground)
    pub const MARGIN_TOP: f64 = 1.5;
    pub const MARGIN_BOTTOM: f64 = 4.0;
    /// Aspect ratio used until the host reports a valid one
    pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

    /// Flyer defaults
    pub const FLYER_RADIUS: f64 = 0.75;
    pub const BOOST_IMPULSE: f64 = 0.8;
    pub const DESCENT_STEP: f64 = 0.04;

    /// Clouds and coins
    pub const DRIFTER_RADIUS: f64 = 0.75;
    pub const DRIFT_STEP: f64 = 0.05;
    /// Vertical band new clouds/coins are drawn from
    pub const SPAWN_BAND_LOW: f64 = -10.0;
    pub const SPAWN_BAND_HIGH: f64 = 8.0;

    /// Spawn periods (seconds of run time)
    pub const OBSTACLE_INTERVAL: f64 = 2.0;
    pub const BONUS_INTERVAL: f64 = 1.5;
    pub const TERRAIN_INTERVAL: f64 = 25.0;

    /// Terrain layout
    pub const TERRAIN_SPACING: f64 = 35.0;
    pub const TERRAIN_LENGTH: f64 = 30.0;
    /// Baseline the dunes sit on
    pub const GROUND_Y: f64 = VIEW_BOTTOM + 1.0;
}

/// Map a unit sample in `[0, 1)` onto `[low, high)`
#[inline]
pub fn sample_band(low: f64, high: f64, unit: f64) -> f64 {
    low + (high - low) * unit.clamp(0.0, 1.0)
}
