//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process; tracks the top 10 runs.
//! Serializable so a host can store it wherever it likes.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Coins collected
    pub score: u32,
    /// Seconds survived
    pub survived: f64,
    /// Run number within the session
    pub run: u32,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished run; returns the rank achieved or None
    pub fn add_score(&mut self, score: u32, survived: f64, run: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            survived,
            run,
        };

        // Sorted descending; ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("Run {} placed #{} with {} coins", run, rank, score);
        Some(rank)
    }

    /// Record the outcome of a `RunEnded` event; other events are ignored
    pub fn record(&mut self, event: &GameEvent, run: u32) -> Option<usize> {
        match *event {
            GameEvent::RunEnded {
                score, run_time, ..
            } => self.add_score(score, run_time, run),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashCause;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 10.0, 1), Some(1));
        assert_eq!(scores.add_score(9, 20.0, 2), Some(1));
        assert_eq!(scores.add_score(7, 15.0, 3), Some(2));
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_capped_at_max() {
        let mut scores = HighScores::new();
        for run in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(10 + run, 1.0, run);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score(5, 1.0, 99), None);
        assert_eq!(scores.add_score(100, 1.0, 100), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(12));
    }

    #[test]
    fn test_record_run_ended() {
        let mut scores = HighScores::new();
        let started = GameEvent::RunStarted { run: 1 };
        assert_eq!(scores.record(&started, 1), None);

        let ended = GameEvent::RunEnded {
            cause: CrashCause::Floor,
            score: 3,
            run_time: 12.5,
        };
        assert_eq!(scores.record(&ended, 1), Some(1));
        assert_eq!(scores.entries[0].survived, 12.5);
    }
}
