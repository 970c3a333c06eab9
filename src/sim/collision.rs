//! Collision detection
//!
//! Every round entity is approximated by a square of half-width equal to its
//! radius. The flyer is tested against the vertical play bounds, every cloud
//! and every coin once per frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::registry::EntityRegistry;
use super::state::{CrashCause, Flyer};
use super::viewport::Viewport;

/// Axis-aligned square around a centre point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: DVec2,
    pub half: f64,
}

impl Aabb {
    pub fn new(center: DVec2, half: f64) -> Self {
        Self { center, half }
    }

    /// Strict overlap test; touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a, b) = (self, other);
        a.center.x + a.half > b.center.x - b.half
            && b.center.x + b.half > a.center.x - a.half
            && a.center.y + a.half > b.center.y - b.half
            && b.center.y + b.half > a.center.y - a.half
    }
}

/// Result of one frame of collision checks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Set if the run must end this frame
    pub crash: Option<CrashCause>,
    /// IDs of coins collected (already removed from the registry)
    pub collected: Vec<u32>,
}

/// Check the flyer against the playable band, ceiling first
pub fn check_bounds(flyer: &Flyer, viewport: &Viewport) -> Option<CrashCause> {
    if flyer.pos.y + flyer.radius >= viewport.ceiling() {
        Some(CrashCause::Ceiling)
    } else if flyer.pos.y - flyer.radius <= viewport.floor() {
        Some(CrashCause::Floor)
    } else {
        None
    }
}

/// First cloud (in spawn order) the flyer touches
pub fn first_obstacle_hit(flyer: &Flyer, registry: &EntityRegistry) -> Option<u32> {
    let body = flyer.aabb();
    registry
        .obstacles
        .iter()
        .find(|cloud| body.overlaps(&cloud.aabb()))
        .map(|cloud| cloud.id)
}

/// Remove every coin the flyer touches, returning their IDs
pub fn collect_bonuses(flyer: &Flyer, registry: &mut EntityRegistry) -> Vec<u32> {
    let body = flyer.aabb();
    let mut collected = Vec::new();
    let mut i = 0;
    while i < registry.bonuses.len() {
        if body.overlaps(&registry.bonuses[i].aabb()) {
            // Index stays put: the next coin has shifted into slot `i`
            collected.push(registry.bonuses.remove(i).id);
        } else {
            i += 1;
        }
    }
    collected
}

/// Full per-frame evaluation.
///
/// Precedence is fixed: bounds exit, then clouds, then coins. A crashing
/// frame collects nothing.
pub fn evaluate(flyer: &Flyer, viewport: &Viewport, registry: &mut EntityRegistry) -> CollisionReport {
    if let Some(cause) = check_bounds(flyer, viewport) {
        return CollisionReport {
            crash: Some(cause),
            collected: Vec::new(),
        };
    }
    if let Some(id) = first_obstacle_hit(flyer, registry) {
        return CollisionReport {
            crash: Some(CrashCause::Cloud { id }),
            collected: Vec::new(),
        };
    }
    CollisionReport {
        crash: None,
        collected: collect_bonuses(flyer, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn flyer_at(x: f64, y: f64) -> Flyer {
        Flyer {
            pos: DVec2::new(x, y),
            radius: FLYER_RADIUS,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(DVec2::new(10.0, 0.0), 0.75);
        let b = Aabb::new(DVec2::new(10.5, 0.0), 0.75);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let far = Aabb::new(DVec2::new(12.0, 0.0), 0.75);
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(DVec2::new(0.0, 0.0), 0.75);
        let b = Aabb::new(DVec2::new(1.5, 0.0), 0.75);
        assert!(!a.overlaps(&b));
        let c = Aabb::new(DVec2::new(0.0, 1.5), 0.75);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Aabb::new(DVec2::new(0.0, 0.0), 0.75);
        let same_x = Aabb::new(DVec2::new(0.2, 5.0), 0.75);
        let same_y = Aabb::new(DVec2::new(5.0, 0.2), 0.75);
        assert!(!a.overlaps(&same_x));
        assert!(!a.overlaps(&same_y));
    }

    #[test]
    fn test_bounds_ceiling_and_floor() {
        let vp = Viewport::default();
        assert_eq!(check_bounds(&flyer_at(0.0, 0.0), &vp), None);
        assert_eq!(
            check_bounds(&flyer_at(0.0, vp.ceiling() - FLYER_RADIUS), &vp),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(
            check_bounds(&flyer_at(0.0, vp.floor() + FLYER_RADIUS), &vp),
            Some(CrashCause::Floor)
        );
        assert_eq!(
            check_bounds(&flyer_at(0.0, vp.floor() + FLYER_RADIUS + 0.01), &vp),
            None
        );
    }

    #[test]
    fn test_obstacle_hit_reports_first_spawned() {
        let mut reg = EntityRegistry::default();
        let miss = reg.spawn_obstacle(DVec2::new(10.0, 5.0));
        let first = reg.spawn_obstacle(DVec2::new(10.5, 0.0));
        let second = reg.spawn_obstacle(DVec2::new(9.5, 0.0));
        let report = evaluate(&flyer_at(10.0, 0.0), &Viewport::compute(10.0, 1.0), &mut reg);
        assert_eq!(report.crash, Some(CrashCause::Cloud { id: first }));
        assert_ne!(first, miss);
        assert_ne!(first, second);
    }

    #[test]
    fn test_collects_all_overlapping_bonuses() {
        let mut reg = EntityRegistry::default();
        let a = reg.spawn_bonus(DVec2::new(9.9, 0.0));
        let b = reg.spawn_bonus(DVec2::new(10.1, 0.2));
        let keep = reg.spawn_bonus(DVec2::new(20.0, 0.0));
        let c = reg.spawn_bonus(DVec2::new(10.0, -0.3));

        let collected = collect_bonuses(&flyer_at(10.0, 0.0), &mut reg);
        assert_eq!(collected, vec![a, b, c]);
        assert_eq!(reg.bonuses.len(), 1);
        assert_eq!(reg.bonuses[0].id, keep);
    }

    #[test]
    fn test_bounds_take_precedence_over_clouds() {
        let vp = Viewport::default();
        let flyer = flyer_at(0.0, vp.ceiling());
        let mut reg = EntityRegistry::default();
        reg.spawn_obstacle(flyer.pos);
        reg.spawn_bonus(flyer.pos);

        let report = evaluate(&flyer, &vp, &mut reg);
        assert_eq!(report.crash, Some(CrashCause::Ceiling));
        assert!(report.collected.is_empty());
        assert_eq!(reg.bonuses.len(), 1);
    }

    #[test]
    fn test_crash_frame_collects_nothing() {
        let mut reg = EntityRegistry::default();
        let cloud = reg.spawn_obstacle(DVec2::new(10.5, 0.0));
        reg.spawn_bonus(DVec2::new(9.9, 0.0));
        let report = evaluate(&flyer_at(10.0, 0.0), &Viewport::compute(10.0, 1.0), &mut reg);
        assert_eq!(report.crash, Some(CrashCause::Cloud { id: cloud }));
        assert!(report.collected.is_empty());
        assert_eq!(reg.bonuses.len(), 1);
    }
}
