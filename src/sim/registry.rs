//! Active entity collections
//!
//! Clouds and coins drift left every frame; terrain stays put in world space
//! and the viewport slides over it. Anything fully left of the viewport is
//! culled.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Drifter, TerrainSegment};
use crate::consts::*;

/// Owner of all transient entities in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Clouds (sorted by id)
    pub obstacles: Vec<Drifter>,
    /// Coins (sorted by id)
    pub bonuses: Vec<Drifter>,
    /// Ground segments (sorted by origin)
    pub terrain: Vec<TerrainSegment>,
    /// Origin for the next terrain segment; `None` until the run is seeded
    terrain_cursor: Option<f64>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            bonuses: Vec::new(),
            terrain: Vec::new(),
            terrain_cursor: None,
            next_id: 1,
        }
    }
}

/// Entities removed by one `cull` pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullReport {
    pub obstacles: usize,
    pub bonuses: usize,
    pub terrain: usize,
}

impl CullReport {
    pub fn total(&self) -> usize {
        self.obstacles + self.bonuses + self.terrain
    }
}

impl EntityRegistry {
    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_obstacle(&mut self, pos: DVec2) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Drifter::new(id, pos));
        id
    }

    pub fn spawn_bonus(&mut self, pos: DVec2) -> u32 {
        let id = self.next_entity_id();
        self.bonuses.push(Drifter::new(id, pos));
        id
    }

    /// Whether the run still needs its initial terrain
    pub fn needs_terrain_seed(&self) -> bool {
        self.terrain_cursor.is_none()
    }

    /// Lay the first two segments so the horizon is never empty
    pub fn seed_terrain(&mut self, flyer_x: f64, patterns: [u8; 2]) {
        self.terrain_cursor = Some(flyer_x - TERRAIN_LENGTH / 2.0);
        for pattern_id in patterns {
            self.spawn_terrain(pattern_id);
        }
    }

    /// Append a segment one spacing after the previous one
    pub fn spawn_terrain(&mut self, pattern_id: u8) -> u32 {
        let origin_x = self.terrain_cursor.unwrap_or(0.0);
        let id = self.next_entity_id();
        self.terrain.push(TerrainSegment::new(id, origin_x, pattern_id));
        self.terrain_cursor = Some(origin_x + TERRAIN_SPACING);
        id
    }

    /// Drift clouds and coins left by a fixed per-frame step
    pub fn advance(&mut self, step: f64) {
        for drifter in self.obstacles.iter_mut().chain(self.bonuses.iter_mut()) {
            drifter.pos.x -= step;
        }
    }

    /// Drop everything whose right edge is at or left of `viewport_left`.
    ///
    /// Each collection is taken, filtered into a fresh vector and swapped
    /// back in, so no element is skipped or visited twice.
    pub fn cull(&mut self, viewport_left: f64) -> CullReport {
        let keep = |edge: f64| edge > viewport_left;

        let before = (self.obstacles.len(), self.bonuses.len(), self.terrain.len());

        self.obstacles = std::mem::take(&mut self.obstacles)
            .into_iter()
            .filter(|d| keep(d.right_edge()))
            .collect();
        self.bonuses = std::mem::take(&mut self.bonuses)
            .into_iter()
            .filter(|d| keep(d.right_edge()))
            .collect();
        self.terrain = std::mem::take(&mut self.terrain)
            .into_iter()
            .filter(|t| keep(t.right_edge()))
            .collect();

        CullReport {
            obstacles: before.0 - self.obstacles.len(),
            bonuses: before.1 - self.bonuses.len(),
            terrain: before.2 - self.terrain.len(),
        }
    }

    /// Remove every entity and forget the terrain cursor
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len() + self.bonuses.len() + self.terrain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
