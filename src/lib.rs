//! # movie-quiz
//!
//! A terminal-based true/false trivia game about movie ratings.
//!
//! Each game is ten rounds. Every round picks a random movie from a
//! remotely loaded catalog of popular movies, draws a rating threshold, and
//! asks whether the movie's rating beats it. Results accumulate in a
//! persistent statistics store that tracks the best game and the average
//! accuracy across all games.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use movie_quiz::data::{FileCatalogLoader, HttpImageResolver};
//! use movie_quiz::engine::{QuestionFactory, SessionEngine};
//! use movie_quiz::stats::{JsonFileStorage, StatisticsService};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let loader = Arc::new(FileCatalogLoader::new("catalog.json"));
//!     let resolver = Arc::new(HttpImageResolver::new());
//!     let stats = StatisticsService::new(JsonFileStorage::open("stats.json"));
//!
//!     let (engine, handle, inbox, events) = SessionEngine::new(
//!         move |tx| QuestionFactory::new(loader, resolver, tx),
//!         stats,
//!     );
//!     tokio::spawn(engine.run(inbox));
//!
//!     movie_quiz::app::run(handle, events).await
//! }
//! ```

pub mod app;
pub mod data;
pub mod engine;
pub mod models;
pub mod stats;
pub mod terminal;
mod ui;

pub use engine::{EngineHandle, QuizCommand, QuizEvent, RetryAction};
pub use models::{GameResult, Movie, QuizQuestion, QuizStep};
