//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per displayed frame, never blocking
//! - Randomness only through the caller's `UniformSource`
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod manifest;
pub mod registry;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod viewport;

pub use clock::{FrameClock, RunClock};
pub use collision::{Aabb, CollisionReport, check_bounds, evaluate};
pub use manifest::{Pose, RenderManifest, TerrainPose};
pub use registry::{CullReport, EntityRegistry};
pub use rng::{FixedSequence, SeededRandom, UniformSource};
pub use spawn::{SpawnFlags, SpawnScheduler, SpawnTimer};
pub use state::{
    CrashCause, DUNE_PATTERNS, Drifter, Flyer, GameEvent, GamePhase, PATTERN_COUNT, ScoreTracker,
    Session, TerrainSegment,
};
pub use tick::{FrameInput, autopilot_boost, tick};
pub use viewport::{AspectTracker, Viewport};
