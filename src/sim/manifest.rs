//! Per-frame render manifest
//!
//! An owned snapshot of what exists and where, built after `tick` returns.
//! Renderers map each pose onto their own meshes.

use glam::{DMat4, DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::state::{Drifter, GamePhase, Session, TerrainSegment};
use super::viewport::Viewport;

/// World-space placement of a single mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: DVec2,
    /// Uniform scale (the entity's radius)
    pub scale: f64,
}

impl Pose {
    pub fn new(translation: DVec2, scale: f64) -> Self {
        Self { translation, scale }
    }

    /// Model matrix in the z = 0 plane with fixed orientation
    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::splat(self.scale),
            DQuat::IDENTITY,
            self.translation.extend(0.0),
        )
    }
}

impl From<&Drifter> for Pose {
    fn from(drifter: &Drifter) -> Self {
        Self::new(drifter.pos, drifter.radius)
    }
}

/// Ground segment layout for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPose {
    pub origin_x: f64,
    pub pattern_id: u8,
    pub dunes: [DVec2; 3],
    pub decor: Vec<DVec2>,
}

impl From<&TerrainSegment> for TerrainPose {
    fn from(segment: &TerrainSegment) -> Self {
        Self {
            origin_x: segment.origin_x,
            pattern_id: segment.pattern_id,
            dunes: segment.dune_positions(),
            decor: segment.decor_positions(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderManifest {
    pub phase: GamePhase,
    pub score: u32,
    pub run_time: f64,
    pub viewport: Viewport,
    pub flyer: Pose,
    pub obstacles: Vec<Pose>,
    pub bonuses: Vec<Pose>,
    pub terrain: Vec<TerrainPose>,
}

impl RenderManifest {
    pub fn capture(session: &Session) -> Self {
        let registry = &session.registry;
        Self {
            phase: session.phase,
            score: session.score.value(),
            run_time: session.clock.run_time(),
            viewport: session.viewport,
            flyer: Pose::new(session.flyer.pos, session.flyer.radius),
            obstacles: registry.obstacles.iter().map(Pose::from).collect(),
            bonuses: registry.bonuses.iter().map(Pose::from).collect(),
            terrain: registry.terrain.iter().map(TerrainPose::from).collect(),
        }
    }
}

impl Session {
    /// Snapshot for the renderer; call after `tick`
    pub fn manifest(&self) -> RenderManifest {
        RenderManifest::capture(self)
    }
}
