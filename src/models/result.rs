use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one completed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Correctly answered rounds.
    pub correct: u32,
    /// Rounds played.
    pub total: u32,
    /// When the game finished.
    pub date: DateTime<Utc>,
}

impl GameResult {
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct,
            total,
            date: Utc::now(),
        }
    }

    /// Strictly more correct answers than `other`. Ties are not better, so
    /// an existing best game survives an equal score.
    pub fn is_better_than(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}
