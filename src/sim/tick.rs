//! Per-frame simulation step
//!
//! One call per displayed frame. The host supplies time, the display aspect
//! ratio, edge-triggered intents and a randomness source; the session is
//! mutated in place and read back through `Session::manifest`.

use super::collision;
use super::rng::UniformSource;
use super::spawn::{drifter_spawn_position, pick_pattern};
use super::state::{CrashCause, GameEvent, GamePhase, Session};
use super::viewport::Viewport;
use crate::consts::*;

/// Host input for a single frame
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Monotonic host time in seconds
    pub elapsed: f64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// Display width / height
    pub aspect_ratio: f64,
    /// Start/restart pressed this frame
    pub start: bool,
    /// Boost pressed this frame
    pub boost: bool,
    /// Idle/demo mode - autopilot flies the plane
    pub idle_mode: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            start: false,
            boost: false,
            idle_mode: false,
        }
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &FrameInput, rng: &mut dyn UniformSource) {
    session.clock.observe(input.elapsed, input.delta);
    let aspect_ratio = session.aspect.observe(input.aspect_ratio);

    if input.start {
        match session.phase {
            GamePhase::Intro | GamePhase::GameOver => begin_run(session),
            GamePhase::Playing => {}
        }
    }

    // Intro and GameOver are frozen; presses there are dropped, not queued
    if session.phase != GamePhase::Playing {
        return;
    }

    if input.boost || (input.idle_mode && autopilot_boost(session)) {
        session.request_boost();
    }

    let run_time = session.clock.run_time();

    // Flyer x is locked to run time, so the camera centres there
    session.viewport = Viewport::compute(run_time, aspect_ratio);

    spawn_due(session, run_time, rng);

    session.registry.advance(DRIFT_STEP);
    let culled = session.registry.cull(session.viewport.left);
    if culled.total() > 0 {
        log::debug!(
            "Culled {} clouds, {} coins, {} terrain at t={:.3}",
            culled.obstacles,
            culled.bonuses,
            culled.terrain,
            run_time
        );
    }

    session.flyer.update_horizontal(run_time);
    let boost = session.take_boost();
    session.flyer.update_vertical(boost);

    let report = collision::evaluate(&session.flyer, &session.viewport, &mut session.registry);
    for id in report.collected {
        let score = session.score.award_coin();
        session.events.push(GameEvent::CoinCollected { id, score });
    }

    session.clock.count_frame();

    if let Some(cause) = report.crash {
        end_run(session, cause);
    }
}

/// Reset and enter Playing
fn begin_run(session: &mut Session) {
    session.restart();
    session.runs += 1;
    session.events.push(GameEvent::RunStarted { run: session.runs });
    log::info!("Run {} started", session.runs);
}

/// Freeze the run and disarm spawning
fn end_run(session: &mut Session, cause: CrashCause) {
    session.phase = GamePhase::GameOver;
    session.scheduler.cancel_all();
    session.clock.freeze();
    session.take_boost();

    let score = session.score.value();
    let run_time = session.clock.run_time();
    session.events.push(GameEvent::RunEnded {
        cause,
        score,
        run_time,
    });
    log::info!(
        "Run {} over: {:?} after {:.2}s ({} frames), {} coins",
        session.runs,
        cause,
        run_time,
        session.clock.frames(),
        score
    );
}

/// Fire whichever spawn timers are due and lay initial terrain
fn spawn_due(session: &mut Session, run_time: f64, rng: &mut dyn UniformSource) {
    let flyer_x = run_time;
    let viewport = session.viewport;
    let registry = &mut session.registry;

    if registry.needs_terrain_seed() {
        let patterns = [pick_pattern(rng), pick_pattern(rng)];
        registry.seed_terrain(flyer_x, patterns);
        log::debug!("Seeded terrain with patterns {:?}", patterns);
    }

    let due = session.scheduler.poll(run_time);
    if due.obstacle {
        let pos = drifter_spawn_position(flyer_x, &viewport, rng);
        let id = registry.spawn_obstacle(pos);
        log::debug!("Cloud {} at ({:.2}, {:.2})", id, pos.x, pos.y);
    }
    if due.bonus {
        let pos = drifter_spawn_position(flyer_x, &viewport, rng);
        let id = registry.spawn_bonus(pos);
        log::debug!("Coin {} at ({:.2}, {:.2})", id, pos.x, pos.y);
    }
    if due.terrain {
        let pattern_id = pick_pattern(rng);
        let id = registry.spawn_terrain(pattern_id);
        log::debug!("Terrain {} with pattern {}", id, pattern_id);
    }
}

/// Demo-mode pilot: decide whether to boost this frame
pub fn autopilot_boost(session: &Session) -> bool {
    let flyer = &session.flyer;
    let viewport = &session.viewport;

    // Never boost into the ceiling; keep clear of the ground
    let safe_high = viewport.ceiling() - flyer.radius - BOOST_IMPULSE - 0.5;
    let safe_low = viewport.floor() + flyer.radius + 1.0;

    // Chase the nearest coin ahead, otherwise cruise mid-band
    let mut target = session
        .registry
        .bonuses
        .iter()
        .filter(|coin| coin.pos.x > flyer.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|coin| coin.pos.y)
        .unwrap_or((safe_high + safe_low) / 2.0);

    // Dodge clouds that are about to arrive
    for cloud in &session.registry.obstacles {
        let ahead = cloud.pos.x - flyer.pos.x;
        if (-2.0..8.0).contains(&ahead) && (cloud.pos.y - target).abs() < 2.5 {
            target = if cloud.pos.y >= flyer.pos.y {
                cloud.pos.y - 2.5
            } else {
                cloud.pos.y + 2.5
            };
        }
    }

    let target = target.clamp(safe_low, safe_high);
    flyer.pos.y < target - BOOST_IMPULSE / 2.0 && flyer.pos.y < safe_high
}
