//! Host settings
//!
//! Configures the runner around the simulation (seed, display, frame pacing).
//! Gameplay constants are fixed and live in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_ASPECT_RATIO;

/// Errors loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runner settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    // === Display ===
    /// Display width / height
    pub aspect_ratio: f64,

    // === Frame pacing ===
    /// Nominal frames per second of the synthetic clock
    pub target_fps: f64,
    /// Random frame-time variation as a fraction of the nominal frame (0.0 - 1.0)
    pub frame_jitter: f64,
    /// Hard cap on frames simulated per run
    pub max_frames_per_run: u64,

    // === Session ===
    /// Number of runs to play back to back
    pub runs: u32,
    /// Let the autopilot fly
    pub idle_mode: bool,
    /// Print the final render manifest as JSON
    pub dump_manifest: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            aspect_ratio: DEFAULT_ASPECT_RATIO,

            target_fps: 60.0,
            frame_jitter: 0.25,
            max_frames_per_run: 60 * 60 * 5,

            runs: 3,
            idle_mode: true,
            dump_manifest: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Nominal seconds per frame
    pub fn frame_time(&self) -> f64 {
        1.0 / self.target_fps
    }

    /// Clamp values the runner cannot use
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            self.aspect_ratio = defaults.aspect_ratio;
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            self.target_fps = defaults.target_fps;
        }
        self.frame_jitter = if self.frame_jitter.is_finite() {
            self.frame_jitter.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}
