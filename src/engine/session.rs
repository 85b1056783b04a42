//! The quiz session engine: round progression, answer scoring, and game
//! finalization.
//!
//! All state lives on one coordination loop. Presentation commands and
//! completions from spawned work (catalog loads, poster resolution, the
//! feedback-delay timer) arrive through a single inbox channel, so no
//! mutation ever races another.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::models::{QuizQuestion, QuizStep};
use crate::stats::{KeyValueStorage, StatisticsService};

use super::events::{EngineMsg, QuizCommand, QuizEvent, RetryAction};
use super::factory::QuestionFactory;
use super::{FEEDBACK_DELAY, QUESTIONS_AMOUNT};

/// Command surface handed to the presentation boundary.
///
/// Sends are fire-and-forget; a send after the engine loop has shut down is
/// silently dropped.
#[derive(Clone)]
pub struct EngineHandle {
    inbox: mpsc::UnboundedSender<EngineMsg>,
}

impl EngineHandle {
    pub fn start(&self) {
        self.send(QuizCommand::Start);
    }

    pub fn submit_answer(&self, yes: bool) {
        self.send(QuizCommand::SubmitAnswer(yes));
    }

    pub fn restart(&self, reload_catalog: bool) {
        self.send(QuizCommand::Restart { reload_catalog });
    }

    pub fn retry(&self, action: RetryAction) {
        self.send(QuizCommand::Retry(action));
    }

    fn send(&self, command: QuizCommand) {
        let _ = self.inbox.send(EngineMsg::Command(command));
    }
}

/// The session engine. Owns the round index, correctness tally, current
/// question, and the answer lock; emits [`QuizEvent`]s for the presentation
/// boundary to render.
pub struct SessionEngine<S: KeyValueStorage> {
    round_index: usize,
    correct_count: u32,
    current_question: Option<QuizQuestion>,
    answer_locked: bool,
    factory: QuestionFactory,
    stats: StatisticsService<S>,
    events: mpsc::UnboundedSender<QuizEvent>,
    inbox: mpsc::UnboundedSender<EngineMsg>,
    feedback_delay: Duration,
}

impl<S: KeyValueStorage> SessionEngine<S> {
    /// Wire up an engine. Returns the engine together with its command
    /// handle, its inbox receiver (drive it with [`SessionEngine::run`]),
    /// and the outbound event stream.
    pub fn new(
        factory_builder: impl FnOnce(mpsc::UnboundedSender<EngineMsg>) -> QuestionFactory,
        stats: StatisticsService<S>,
    ) -> (
        Self,
        EngineHandle,
        mpsc::UnboundedReceiver<EngineMsg>,
        mpsc::UnboundedReceiver<QuizEvent>,
    ) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let engine = Self {
            round_index: 0,
            correct_count: 0,
            current_question: None,
            answer_locked: false,
            factory: factory_builder(inbox_tx.clone()),
            stats,
            events: events_tx,
            inbox: inbox_tx.clone(),
            feedback_delay: FEEDBACK_DELAY,
        };
        let handle = EngineHandle { inbox: inbox_tx };
        (engine, handle, inbox_rx, events_rx)
    }

    /// Drive the coordination loop until every inbox sender is gone.
    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<EngineMsg>) {
        while let Some(msg) = inbox.recv().await {
            self.handle(msg);
        }
    }

    /// Apply one inbox message to the session state.
    pub fn handle(&mut self, msg: EngineMsg) {
        match msg {
            EngineMsg::Command(QuizCommand::Start) => self.start(),
            EngineMsg::Command(QuizCommand::SubmitAnswer(yes)) => self.submit_answer(yes),
            EngineMsg::Command(QuizCommand::Restart { reload_catalog }) => {
                self.restart(reload_catalog)
            }
            EngineMsg::Command(QuizCommand::Retry(action)) => self.retry(action),
            EngineMsg::CatalogLoaded(movies) => self.on_catalog_loaded(movies),
            EngineMsg::CatalogLoadFailed(err) => self.on_catalog_load_failed(err.to_string()),
            EngineMsg::QuestionReady(question) => self.on_question_received(question),
            EngineMsg::QuestionUnavailable(err) => {
                self.emit(QuizEvent::RecoverableError {
                    message: format!("Could not load the poster: {err}"),
                    retry: RetryAction::NextQuestion,
                });
            }
            EngineMsg::Advance => self.advance(),
        }
    }

    fn start(&mut self) {
        self.reset_round_state();
        self.emit(QuizEvent::LoadingStarted);
        self.factory.load_catalog();
    }

    fn restart(&mut self, reload_catalog: bool) {
        self.reset_round_state();
        if reload_catalog {
            self.emit(QuizEvent::LoadingStarted);
            self.factory.load_catalog();
        } else {
            self.factory.request_next();
        }
    }

    fn retry(&mut self, action: RetryAction) {
        match action {
            RetryAction::ReloadCatalog => self.restart(true),
            RetryAction::NextQuestion => self.factory.request_next(),
        }
    }

    fn on_catalog_loaded(&mut self, movies: Vec<crate::models::Movie>) {
        self.factory.set_catalog(movies);
        self.emit(QuizEvent::LoadingFinished);
        self.factory.request_next();
    }

    fn on_catalog_load_failed(&mut self, message: String) {
        log::warn!("catalog load failed: {message}");
        self.emit(QuizEvent::LoadingFinished);
        self.emit(QuizEvent::RecoverableError {
            message,
            retry: RetryAction::ReloadCatalog,
        });
    }

    fn on_question_received(&mut self, question: Option<QuizQuestion>) {
        let Some(question) = question else {
            // generation failure upstream; already logged by the factory
            return;
        };
        let step = self.convert(&question);
        self.current_question = Some(question);
        self.answer_locked = false;
        self.emit(QuizEvent::DisplayStep(step));
    }

    /// Score an answer from the presentation boundary.
    ///
    /// A benign double-trigger (no current question, or the answer is
    /// already locked) is a silent no-op, never an error.
    fn submit_answer(&mut self, yes: bool) {
        if self.answer_locked {
            log::debug!("answer ignored: round already answered");
            return;
        }
        let Some(question) = &self.current_question else {
            log::debug!("answer ignored: no current question");
            return;
        };

        let is_correct = yes == question.correct_answer;
        if is_correct {
            self.correct_count += 1;
        }
        self.answer_locked = true;
        self.emit(QuizEvent::AnswerFeedback { is_correct });
        self.schedule_advance();
    }

    /// Advance after the feedback delay: next round, or finalize the game.
    fn advance(&mut self) {
        if !self.answer_locked {
            // stray timer after a restart or teardown
            return;
        }
        self.emit(QuizEvent::RoundAdvanceVisualReset);
        self.current_question = None;
        self.answer_locked = false;

        if self.round_index == QUESTIONS_AMOUNT - 1 {
            self.finalize_game();
        } else {
            self.round_index += 1;
            self.factory.request_next();
        }
    }

    fn finalize_game(&mut self) {
        let correct = self.correct_count;
        let total = QUESTIONS_AMOUNT as u32;
        if let Err(err) = self.stats.record(correct, total) {
            log::error!("failed to persist game statistics: {err}");
        }
        self.emit(QuizEvent::Results {
            correct,
            total,
            games_count: self.stats.games_count(),
            best_game: self.stats.best_game(),
            total_accuracy: self.stats.total_accuracy(),
        });
    }

    fn schedule_advance(&self) {
        let inbox = self.inbox.clone();
        let delay = self.feedback_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // dropped silently if the engine is already gone
            let _ = inbox.send(EngineMsg::Advance);
        });
    }

    fn reset_round_state(&mut self) {
        self.round_index = 0;
        self.correct_count = 0;
        self.current_question = None;
        self.answer_locked = false;
    }

    fn convert(&self, question: &QuizQuestion) -> QuizStep {
        QuizStep {
            image: question.image.clone(),
            question: question.text.clone(),
            round_label: format!("{}/{}", self.round_index + 1, QUESTIONS_AMOUNT),
        }
    }

    fn emit(&self, event: QuizEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::data::{CatalogError, CatalogLoader, ImageResolver, ResolveError};
    use crate::models::Movie;
    use crate::stats::MemoryStorage;
    use crate::stats::StatisticsService;

    use super::*;

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CatalogLoader for CountingLoader {
        async fn load_catalog(&self) -> Result<Vec<Movie>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Movie {
                id: "tt0110912".to_string(),
                title: "Pulp Fiction".to_string(),
                rating: 8.9,
                poster_url: "https://img.example/pf._V1_.jpg".to_string(),
            }])
        }
    }

    struct StubResolver;

    #[async_trait]
    impl ImageResolver for StubResolver {
        async fn resolve(&self, _movie: &Movie) -> Result<Vec<u8>, ResolveError> {
            Ok(vec![1, 2, 3])
        }
    }

    struct Harness {
        engine: SessionEngine<MemoryStorage>,
        handle: EngineHandle,
        inbox: mpsc::UnboundedReceiver<EngineMsg>,
        events: mpsc::UnboundedReceiver<QuizEvent>,
        loader_calls: Arc<AtomicUsize>,
    }

    impl Harness {
        fn new() -> Self {
            let loader_calls = Arc::new(AtomicUsize::new(0));
            let calls = Arc::clone(&loader_calls);
            let (mut engine, handle, inbox, events) = SessionEngine::new(
                |inbox_tx| {
                    QuestionFactory::new(
                        Arc::new(CountingLoader { calls }),
                        Arc::new(StubResolver),
                        inbox_tx,
                    )
                },
                StatisticsService::new(MemoryStorage::new()),
            );
            // keep unit tests off the wall clock
            engine.feedback_delay = Duration::ZERO;
            Self {
                engine,
                handle,
                inbox,
                events,
                loader_calls,
            }
        }

        /// Pump inbox messages into the engine until one matching event
        /// arrives, returning it.
        async fn drive_until<T>(&mut self, mut pick: impl FnMut(&QuizEvent) -> Option<T>) -> T {
            loop {
                while let Ok(event) = self.events.try_recv() {
                    if let Some(found) = pick(&event) {
                        return found;
                    }
                }
                let msg = self.inbox.recv().await.expect("engine inbox closed");
                self.engine.handle(msg);
            }
        }

        async fn next_step(&mut self) -> QuizStep {
            self.drive_until(|event| match event {
                QuizEvent::DisplayStep(step) => Some(step.clone()),
                _ => None,
            })
            .await
        }
    }

    #[tokio::test]
    async fn test_first_round_label() {
        let mut h = Harness::new();
        h.handle.start();
        let step = h.next_step().await;
        assert_eq!(step.round_label, "1/10");
        assert_eq!(step.image, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_round_labels_progress_to_total() {
        let mut h = Harness::new();
        h.handle.start();
        for round in 1..=QUESTIONS_AMOUNT {
            let step = h.next_step().await;
            assert_eq!(step.round_label, format!("{round}/10"));
            h.engine.submit_answer(true);
            h.engine.advance();
        }
    }

    #[tokio::test]
    async fn test_submit_is_idempotent_under_lock() {
        let mut h = Harness::new();
        h.handle.start();
        h.next_step().await;

        let yes = h.engine.current_question.as_ref().unwrap().correct_answer;
        h.engine.submit_answer(yes);
        h.engine.submit_answer(yes);
        h.engine.submit_answer(yes);

        assert_eq!(h.engine.correct_count, 1);

        // exactly one feedback event went out
        let mut feedback = 0;
        while let Ok(event) = h.events.try_recv() {
            if matches!(event, QuizEvent::AnswerFeedback { .. }) {
                feedback += 1;
            }
        }
        assert_eq!(feedback, 1);
    }

    #[tokio::test]
    async fn test_submit_without_question_is_a_no_op() {
        let mut h = Harness::new();
        h.engine.submit_answer(true);
        assert_eq!(h.engine.correct_count, 0);
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_feedback_fires_before_advance() {
        let mut h = Harness::new();
        h.handle.start();
        h.next_step().await;

        let yes = h.engine.current_question.as_ref().unwrap().correct_answer;
        h.engine.submit_answer(!yes);

        let is_correct = h
            .drive_until(|event| match event {
                QuizEvent::AnswerFeedback { is_correct } => Some(*is_correct),
                _ => None,
            })
            .await;
        assert!(!is_correct);
        assert!(h.engine.answer_locked);
    }

    #[tokio::test]
    async fn test_perfect_game_records_results() {
        let mut h = Harness::new();
        h.handle.start();

        for _ in 0..QUESTIONS_AMOUNT {
            let _ = h.next_step().await;
            let yes = h.engine.current_question.as_ref().unwrap().correct_answer;
            h.engine.submit_answer(yes);
        }

        let (correct, games_count, best_correct, accuracy) = h
            .drive_until(|event| match event {
                QuizEvent::Results {
                    correct,
                    games_count,
                    best_game,
                    total_accuracy,
                    ..
                } => Some((*correct, *games_count, best_game.correct, *total_accuracy)),
                _ => None,
            })
            .await;

        assert_eq!(correct, 10);
        assert_eq!(games_count, 1);
        assert_eq!(best_correct, 10);
        assert_eq!(accuracy, 100.0);
    }

    #[tokio::test]
    async fn test_restart_without_reload_skips_the_loader() {
        let mut h = Harness::new();
        h.handle.start();
        h.next_step().await;
        let loads_before = h.loader_calls.load(Ordering::SeqCst);

        let yes = h.engine.current_question.as_ref().unwrap().correct_answer;
        h.engine.submit_answer(yes);
        h.engine.advance();
        h.engine.restart(false);

        assert_eq!(h.engine.round_index, 0);
        assert_eq!(h.engine.correct_count, 0);

        // a fresh first question arrives without another catalog load
        let step = h.next_step().await;
        assert_eq!(step.round_label, "1/10");
        assert_eq!(h.loader_calls.load(Ordering::SeqCst), loads_before);
    }

    #[tokio::test]
    async fn test_stray_advance_is_ignored() {
        let mut h = Harness::new();
        h.handle.start();
        h.next_step().await;

        h.engine.handle(EngineMsg::Advance);
        assert_eq!(h.engine.round_index, 0);
        assert!(h.engine.current_question.is_some());
    }

    #[tokio::test]
    async fn test_question_failure_suggests_requesting_again() {
        let mut h = Harness::new();
        h.engine
            .handle(EngineMsg::QuestionUnavailable(quiet_resolve_error()));

        let retry = h
            .drive_until(|event| match event {
                QuizEvent::RecoverableError { retry, .. } => Some(*retry),
                _ => None,
            })
            .await;
        assert_eq!(retry, RetryAction::NextQuestion);
    }

    #[tokio::test]
    async fn test_null_question_is_ignored() {
        let mut h = Harness::new();
        h.engine.handle(EngineMsg::QuestionReady(None));
        assert!(h.engine.current_question.is_none());
        assert!(h.events.try_recv().is_err());
    }

    fn quiet_resolve_error() -> ResolveError {
        // manufacture a reqwest error without touching the network
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("invalid request must not build");
        ResolveError::Http(err)
    }
}
