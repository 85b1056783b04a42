//! Terminal front-end for the quiz engine.
//!
//! Consumes the engine's event stream, projects it into a view state, and
//! translates key presses into engine commands. The engine itself runs on
//! its own task; this loop never touches session state directly.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::engine::{EngineHandle, QuizEvent, RetryAction};
use crate::models::{GameResult, QuizStep};
use crate::terminal;
use crate::ui;

/// What the terminal is currently showing.
pub enum ViewState {
    /// Catalog is loading.
    Loading,
    /// A round is on screen; `feedback` colors the poster border after an
    /// answer until the visual reset.
    Question {
        step: QuizStep,
        feedback: Option<bool>,
    },
    /// The round is over.
    Results {
        correct: u32,
        total: u32,
        games_count: u32,
        best_game: GameResult,
        total_accuracy: f64,
    },
    /// A recoverable error with its suggested remediation.
    Notice { message: String, retry: RetryAction },
}

/// View-side application state.
pub struct App {
    pub state: ViewState,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            should_quit: false,
        }
    }

    /// Fold one engine event into the view state.
    pub fn apply(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::DisplayStep(step) => {
                self.state = ViewState::Question {
                    step,
                    feedback: None,
                };
            }
            QuizEvent::AnswerFeedback { is_correct } => {
                if let ViewState::Question { feedback, .. } = &mut self.state {
                    *feedback = Some(is_correct);
                }
            }
            QuizEvent::RoundAdvanceVisualReset => {
                if let ViewState::Question { feedback, .. } = &mut self.state {
                    *feedback = None;
                }
            }
            QuizEvent::Results {
                correct,
                total,
                games_count,
                best_game,
                total_accuracy,
            } => {
                self.state = ViewState::Results {
                    correct,
                    total,
                    games_count,
                    best_game,
                    total_accuracy,
                };
            }
            QuizEvent::RecoverableError { message, retry } => {
                self.state = ViewState::Notice { message, retry };
            }
            QuizEvent::LoadingStarted => {
                self.state = ViewState::Loading;
            }
            QuizEvent::LoadingFinished => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the TUI until the player quits.
pub async fn run(
    handle: EngineHandle,
    mut events: mpsc::UnboundedReceiver<QuizEvent>,
) -> io::Result<()> {
    let mut term = terminal::init()?;
    let mut app = App::new();

    handle.start();

    let result = run_event_loop(&mut term, &mut app, &handle, &mut events);
    terminal::restore()?;
    result
}

fn run_event_loop(
    term: &mut terminal::QuizTerminal,
    app: &mut App,
    handle: &EngineHandle,
    events: &mut mpsc::UnboundedReceiver<QuizEvent>,
) -> io::Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.apply(event);
        }

        if app.should_quit {
            return Ok(());
        }

        term.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_input(app, handle, key.code);
            }
        }
    }
}

fn handle_input(app: &mut App, handle: &EngineHandle, key: KeyCode) {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        app.should_quit = true;
        return;
    }

    match &app.state {
        ViewState::Loading => {}
        ViewState::Question { feedback, .. } => {
            // answers during the feedback window are locked engine-side
            // anyway; skipping the send keeps the UI honest
            if feedback.is_none() {
                match key {
                    KeyCode::Char('y') | KeyCode::Char('Y') => handle.submit_answer(true),
                    KeyCode::Char('n') | KeyCode::Char('N') => handle.submit_answer(false),
                    _ => {}
                }
            }
        }
        ViewState::Results { .. } => {
            if matches!(key, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
                handle.restart(false);
            }
        }
        ViewState::Notice { retry, .. } => {
            if matches!(key, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
                handle.retry(*retry);
            }
        }
    }
}
