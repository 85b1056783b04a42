//! Event and command surfaces between the session engine, its async
//! collaborators, and the presentation layer.

use crate::data::{CatalogError, ResolveError};
use crate::models::{GameResult, Movie, QuizQuestion, QuizStep};

/// Remediation the presentation layer may echo back after a recoverable
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Restart the game and reload the catalog (catalog load failed).
    ReloadCatalog,
    /// Ask for another question (a poster could not be resolved).
    NextQuestion,
}

/// Commands accepted from the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Begin a game: load the catalog, then request the first question.
    Start,
    /// Answer the current question with yes (`true`) or no (`false`).
    SubmitAnswer(bool),
    /// Reset the session; optionally reload the catalog first.
    Restart { reload_catalog: bool },
    /// Execute a previously suggested remediation.
    Retry(RetryAction),
}

/// Events emitted to the presentation boundary.
#[derive(Debug, Clone)]
pub enum QuizEvent {
    /// A new round is ready to display.
    DisplayStep(QuizStep),
    /// Fired immediately on answer submission, before the advance delay.
    AnswerFeedback { is_correct: bool },
    /// Fired once the advance delay elapses, regardless of branch.
    RoundAdvanceVisualReset,
    /// The game finished; carries the freshly updated aggregates.
    Results {
        correct: u32,
        total: u32,
        games_count: u32,
        best_game: GameResult,
        total_accuracy: f64,
    },
    /// Something failed but the game can go on.
    RecoverableError { message: String, retry: RetryAction },
    /// A catalog load began.
    LoadingStarted,
    /// The catalog load finished, successfully or not.
    LoadingFinished,
}

/// Everything funneled into the engine's single coordination loop:
/// presentation commands plus completions from spawned work.
#[derive(Debug)]
pub enum EngineMsg {
    Command(QuizCommand),
    CatalogLoaded(Vec<Movie>),
    CatalogLoadFailed(CatalogError),
    /// `None` signals a generation failure upstream (e.g. empty catalog).
    QuestionReady(Option<QuizQuestion>),
    QuestionUnavailable(ResolveError),
    /// The post-answer feedback delay elapsed.
    Advance,
}
