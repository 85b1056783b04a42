//! The quiz core: session engine, question factory, and the event/command
//! contract with the presentation boundary.

mod events;
mod factory;
mod session;

pub use events::{EngineMsg, QuizCommand, QuizEvent, RetryAction};
pub use factory::QuestionFactory;
pub use session::{EngineHandle, SessionEngine};

use std::time::Duration;

/// Rounds per game.
pub const QUESTIONS_AMOUNT: usize = 10;

/// How long the answer-feedback highlight stays up before the round
/// advances. Answers are locked for the whole window.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(1);
