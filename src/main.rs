//! Cloud Hopper headless runner
//!
//! Plays back-to-back runs against a jittery synthetic clock, logging every
//! run and printing the leaderboard. Pass a settings JSON path as the first
//! argument; `RUST_LOG=debug` shows spawn/cull activity.

#[cfg(not(target_arch = "wasm32"))]
use cloud_hopper::sim::{
    FrameClock, FrameInput, GamePhase, SeededRandom, Session, UniformSource, tick,
};
#[cfg(not(target_arch = "wasm32"))]
use cloud_hopper::{HighScores, Settings};

/// Back-to-back runs against a synthetic host clock
#[cfg(not(target_arch = "wasm32"))]
struct Runner {
    settings: Settings,
    rng: SeededRandom,
    pacing: SeededRandom,
    clock: FrameClock,
    session: Session,
    scores: HighScores,
}

#[cfg(not(target_arch = "wasm32"))]
impl Runner {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            rng: SeededRandom::new(seed),
            // Frame pacing has its own stream so jitter never changes what spawns
            pacing: SeededRandom::new(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15),
            clock: FrameClock::new(),
            session: Session::new(),
            scores: HighScores::new(),
        }
    }

    fn play_all(&mut self) {
        for _ in 0..self.settings.runs {
            self.play_run();
        }
    }

    /// Play one run until it ends or hits the frame cap
    fn play_run(&mut self) {
        let mut start = true;
        let mut frames = 0u64;
        loop {
            let jitter = (self.pacing.next_unit() * 2.0 - 1.0) * self.settings.frame_jitter;
            let (elapsed, delta) = self
                .clock
                .advance(self.settings.frame_time() * (1.0 + jitter));
            let input = FrameInput {
                elapsed,
                delta,
                aspect_ratio: self.settings.aspect_ratio,
                start,
                boost: false,
                idle_mode: self.settings.idle_mode,
            };
            start = false;

            tick(&mut self.session, &input, &mut self.rng);
            frames += 1;

            for event in self.session.drain_events() {
                self.scores.record(&event, self.session.runs);
            }

            if self.session.phase != GamePhase::Playing {
                return;
            }
            if frames >= self.settings.max_frames_per_run {
                self.abandon_run(frames);
                return;
            }
        }
    }

    /// Score a capped run and drop back to Intro so the next run can start
    fn abandon_run(&mut self, frames: u64) {
        log::warn!(
            "Run {} still alive after {} frames, abandoning",
            self.session.runs,
            frames
        );
        self.scores.add_score(
            self.session.score.value(),
            self.session.clock.run_time(),
            self.session.runs,
        );
        let runs = self.session.runs;
        self.session = Session::new();
        self.session.runs = runs;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Cloud Hopper (headless) starting, seed {}", seed);

    let mut runner = Runner::new(settings, seed);
    runner.play_all();

    if runner.settings.dump_manifest {
        match serde_json::to_string_pretty(&runner.session.manifest()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize manifest: {}", e),
        }
    }

    println!("\nLeaderboard (seed {seed}):");
    if runner.scores.is_empty() {
        println!("  no coins collected");
    }
    for (rank, entry) in runner.scores.entries.iter().enumerate() {
        println!(
            "  #{:<2} {:>4} coins  {:>7.2}s  run {}",
            rank + 1,
            entry.score,
            entry.survived,
            entry.run
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a web host; there is no standalone entry point
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn capped(runs: u32) -> Settings {
        Settings {
            seed: Some(7),
            frame_jitter: 0.0,
            max_frames_per_run: 10,
            runs,
            idle_mode: false,
            ..Settings::default()
        }
    }

    #[test]
    fn test_capped_runs_do_not_end_the_session() {
        let mut runner = Runner::new(capped(3), 7);
        runner.play_all();
        assert_eq!(runner.session.runs, 3);
        assert_eq!(runner.session.phase, GamePhase::Intro);
    }

    #[test]
    fn test_next_run_starts_after_cap() {
        let mut runner = Runner::new(capped(2), 7);
        runner.play_run();
        assert_eq!(runner.session.runs, 1);
        assert_eq!(runner.session.phase, GamePhase::Intro);

        runner.play_run();
        assert_eq!(runner.session.runs, 2);
        assert!(runner.scores.is_empty());
    }
}
