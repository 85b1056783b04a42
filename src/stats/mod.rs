//! Persistent game statistics: cumulative counters, the best game, and the
//! aggregate accuracy computed over them.

mod storage;

pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};

use chrono::{DateTime, Utc};

use crate::engine::QUESTIONS_AMOUNT;
use crate::models::GameResult;

const KEY_GAMES_COUNT: &str = "gamesCount";
const KEY_CORRECT_ANSWERS: &str = "correctAnswers";
const KEY_BEST_CORRECT: &str = "bestGame.correct";
const KEY_BEST_TOTAL: &str = "bestGame.total";
const KEY_BEST_DATE: &str = "bestGame.date";

/// Statistics service over a [`KeyValueStorage`].
///
/// All persisted fields of a recorded game go out in one flush, so a reader
/// never observes the games counter without the matching answer total.
pub struct StatisticsService<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> StatisticsService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Total completed games. Absent key reads as 0.
    pub fn games_count(&self) -> u32 {
        self.read_u32(KEY_GAMES_COUNT)
    }

    /// Correct answers summed across all games.
    pub fn correct_answers_total(&self) -> u32 {
        self.read_u32(KEY_CORRECT_ANSWERS)
    }

    /// The historically highest-scoring game. Absent keys read as a
    /// zero-score game at the epoch.
    pub fn best_game(&self) -> GameResult {
        GameResult {
            correct: self.read_u32(KEY_BEST_CORRECT),
            total: self.read_u32(KEY_BEST_TOTAL),
            date: self
                .storage
                .get(KEY_BEST_DATE)
                .and_then(|raw| raw.parse::<DateTime<Utc>>().ok())
                .unwrap_or(DateTime::UNIX_EPOCH),
        }
    }

    /// Share of all answers that were correct, in percent.
    ///
    /// Every game has exactly [`QUESTIONS_AMOUNT`] rounds, so the store
    /// keeps only running totals and the denominator is derived.
    pub fn total_accuracy(&self) -> f64 {
        let games = self.games_count();
        if games == 0 {
            return 0.0;
        }
        let answered = games * QUESTIONS_AMOUNT as u32;
        f64::from(self.correct_answers_total()) / f64::from(answered) * 100.0
    }

    /// Record one completed game and persist the batch.
    pub fn record(&mut self, correct: u32, total: u32) -> Result<(), StorageError> {
        let games = self.games_count() + 1;
        let answers = self.correct_answers_total() + correct;
        self.storage.set(KEY_GAMES_COUNT, games.to_string());
        self.storage.set(KEY_CORRECT_ANSWERS, answers.to_string());

        let result = GameResult::new(correct, total);
        if result.is_better_than(&self.best_game()) {
            self.storage.set(KEY_BEST_CORRECT, result.correct.to_string());
            self.storage.set(KEY_BEST_TOTAL, result.total.to_string());
            self.storage.set(KEY_BEST_DATE, result.date.to_rfc3339());
        }

        self.storage.flush()
    }

    fn read_u32(&self, key: &str) -> u32 {
        self.storage
            .get(key)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StatisticsService<MemoryStorage> {
        StatisticsService::new(MemoryStorage::new())
    }

    #[test]
    fn test_empty_store_defaults() {
        let stats = service();
        assert_eq!(stats.games_count(), 0);
        assert_eq!(stats.correct_answers_total(), 0);
        assert_eq!(stats.total_accuracy(), 0.0);

        let best = stats.best_game();
        assert_eq!(best.correct, 0);
        assert_eq!(best.date, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_record_accumulates_counters() {
        let mut stats = service();
        let scores = [7, 4, 9];
        for correct in scores {
            stats.record(correct, 10).unwrap();
        }
        assert_eq!(stats.games_count(), 3);
        assert_eq!(stats.correct_answers_total(), 20);
    }

    #[test]
    fn test_best_game_is_max_first_occurrence_wins() {
        let mut stats = service();
        stats.record(6, 10).unwrap();
        let first_best = stats.best_game();

        stats.record(6, 10).unwrap();
        // tie keeps the earlier result, including its date
        assert_eq!(stats.best_game(), first_best);

        stats.record(8, 10).unwrap();
        assert_eq!(stats.best_game().correct, 8);

        stats.record(7, 10).unwrap();
        assert_eq!(stats.best_game().correct, 8);
    }

    #[test]
    fn test_total_accuracy_perfect_games() {
        let mut stats = service();
        stats.record(10, 10).unwrap();
        stats.record(10, 10).unwrap();
        assert_eq!(stats.total_accuracy(), 100.0);
    }

    #[test]
    fn test_total_accuracy_mixed() {
        let mut stats = service();
        stats.record(5, 10).unwrap();
        stats.record(10, 10).unwrap();
        assert_eq!(stats.total_accuracy(), 75.0);
    }
}
