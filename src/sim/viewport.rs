//! Visible world window
//!
//! The camera follows the flyer horizontally; the vertical extent is fixed.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World-space rectangle currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::compute(0.0, DEFAULT_ASPECT_RATIO)
    }
}

impl Viewport {
    /// Window centred on `center_x` for the given display aspect ratio
    pub fn compute(center_x: f64, aspect_ratio: f64) -> Self {
        let height = VIEW_TOP - VIEW_BOTTOM;
        let half_width = aspect_ratio * height / 2.0;
        Self {
            left: center_x - half_width,
            right: center_x + half_width,
            top: VIEW_TOP,
            bottom: VIEW_BOTTOM,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Highest y the flyer's top edge may reach
    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.top - MARGIN_TOP
    }

    /// Lowest y the flyer's bottom edge may reach
    #[inline]
    pub fn floor(&self) -> f64 {
        self.bottom + MARGIN_BOTTOM
    }
}

/// Accepts aspect ratios reported by the host, remembering the last good one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectTracker {
    current: f64,
}

impl Default for AspectTracker {
    fn default() -> Self {
        Self {
            current: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl AspectTracker {
    /// Returns the ratio to use this frame
    pub fn observe(&mut self, reported: f64) -> f64 {
        if reported.is_finite() && reported > 0.0 {
            self.current = reported;
        } else {
            log::warn!(
                "Ignoring invalid aspect ratio {}, keeping {}",
                reported,
                self.current
            );
        }
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_centered_on_flyer() {
        let vp = Viewport::compute(10.0, 2.0);
        assert!((vp.height() - 25.5).abs() < 1e-12);
        assert!((vp.width() - 51.0).abs() < 1e-12);
        assert!((vp.left - (10.0 - 25.5)).abs() < 1e-12);
        assert!((vp.right - (10.0 + 25.5)).abs() < 1e-12);
        assert_eq!(vp.top, 10.5);
        assert_eq!(vp.bottom, -15.0);
    }

    #[test]
    fn test_viewport_tracks_resize() {
        let wide = Viewport::compute(0.0, 2.0);
        let narrow = Viewport::compute(0.0, 1.0);
        assert!(wide.width() > narrow.width());
        assert_eq!(wide.top, narrow.top);
    }

    #[test]
    fn test_playable_band_margins() {
        let vp = Viewport::default();
        assert_eq!(vp.ceiling(), VIEW_TOP - MARGIN_TOP);
        assert_eq!(vp.floor(), VIEW_BOTTOM + MARGIN_BOTTOM);
    }

    #[test]
    fn test_aspect_tracker_rejects_garbage() {
        let mut tracker = AspectTracker::default();
        assert_eq!(tracker.observe(1.5), 1.5);
        assert_eq!(tracker.observe(0.0), 1.5);
        assert_eq!(tracker.observe(f64::NAN), 1.5);
        assert_eq!(tracker.observe(-2.0), 1.5);
        assert_eq!(tracker.observe(2.0), 2.0);
    }
}
