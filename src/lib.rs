//! # quiz-master
//!
//! A timed multiple-choice quiz for the terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_master::{Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Fetch questions from the configured source and play in the terminal
//!     Quiz::new(QuizConfig::default()).run().await
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod engine;
mod error;
mod models;
pub mod presenter;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

pub use app::{Action, App, AppEvent};
pub use config::{QuestionSource, QuizConfig};
pub use data::{
    JsonFileLoader, OpenTdbLoader, QuestionLoader, decode_entities, load_questions_from_json,
    loader_for,
};
pub use engine::{AdvanceOutcome, Answer, Phase, QuizEngine, QuizView, TickOutcome};
pub use error::{ConfigError, FetchError, QuizError};
pub use models::Question;
pub use presenter::{OptionPresenter, OptionStatus};

/// A quiz that can be run in the terminal.
pub struct Quiz {
    config: QuizConfig,
    loader: Arc<dyn QuestionLoader>,
}

impl Quiz {
    /// Create a quiz fed by the source named in `config`.
    pub fn new(config: QuizConfig) -> Self {
        let loader = loader_for(&config.source);
        Self { config, loader }
    }

    /// Create a quiz with a custom question source.
    pub fn with_loader(config: QuizConfig, loader: Arc<dyn QuestionLoader>) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(&self.config, tx.clone());

        let mut guard = terminal::init()?;
        let result = run_event_loop(&mut guard, &mut app, rx, tx, self.loader).await;
        finish(result, guard.restore())
    }
}

/// The loop's own error wins; a failed terminal restore is only logged.
fn finish(result: Result<(), QuizError>, restored: io::Result<()>) -> Result<(), QuizError> {
    if let Err(e) = restored {
        warn!(error = %e, "failed to restore terminal");
    }
    result
}

async fn run_event_loop(
    guard: &mut terminal::TerminalGuard,
    app: &mut App,
    mut events: mpsc::UnboundedReceiver<AppEvent>,
    sender: UnboundedSender<AppEvent>,
    loader: Arc<dyn QuestionLoader>,
) -> Result<(), QuizError> {
    let mut keys = EventStream::new();

    loop {
        guard.terminal().draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            key_event = keys.next() => match key_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_input(app, key.code) {
                        Some(Action::Quit) => break,
                        Some(Action::FetchQuestions) => {
                            spawn_fetch(Arc::clone(&loader), sender.clone());
                        }
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = events.recv() => app.handle_event(event),
        }
    }

    Ok(())
}

fn spawn_fetch(loader: Arc<dyn QuestionLoader>, sender: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = loader.fetch_questions().await;
        if sender.send(AppEvent::QuestionsLoaded(result)).is_err() {
            debug!("quiz closed before questions arrived");
        }
    });
}

/// Map a key press to app operations. Returns an action for the event loop.
pub fn handle_input(app: &mut App, key: KeyCode) -> Option<Action> {
    match app.phase() {
        Phase::Idle => handle_welcome_input(app, key),
        Phase::Loading => handle_loading_input(key),
        Phase::InProgress => handle_quiz_input(app, key),
        Phase::Finished => handle_result_input(app, key),
    }
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Enter => app.request_start(),
        key if is_quit(key) => Some(Action::Quit),
        _ => None,
    }
}

fn handle_loading_input(key: KeyCode) -> Option<Action> {
    is_quit(key).then_some(Action::Quit)
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.advance();
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.click_option(index);
        }
        key if is_quit(key) => return Some(Action::Quit),
        _ => {}
    }
    None
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        key if is_quit(key) => return Some(Action::Quit),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::with_presenter(&QuizConfig::default(), tx, OptionPresenter::seeded(11));
        (app, rx)
    }

    fn one_question() -> Vec<Question> {
        vec![Question::new(
            "Capital of France?",
            "Paris",
            ["Rome", "Berlin", "Madrid"],
        )]
    }

    #[tokio::test(start_paused = true)]
    async fn test_welcome_keys() {
        let (mut app, _rx) = app();
        assert_eq!(handle_input(&mut app, KeyCode::Char('x')), None);
        assert_eq!(
            handle_input(&mut app, KeyCode::Enter),
            Some(Action::FetchQuestions)
        );
        assert_eq!(app.phase(), Phase::Loading);
        assert_eq!(handle_input(&mut app, KeyCode::Enter), None);
        assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_round_by_keys() {
        let (mut app, _rx) = app();
        handle_input(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::QuestionsLoaded(Ok(one_question())));

        let paris = app
            .current_options()
            .iter()
            .position(|o| o == "Paris")
            .unwrap();
        let digit = char::from_digit(paris as u32 + 1, 10).unwrap();
        handle_input(&mut app, KeyCode::Char(digit));
        assert!(app.engine().can_advance());

        // A second digit press must not change the locked answer.
        let other = char::from_digit(((paris + 1) % 4) as u32 + 1, 10).unwrap();
        handle_input(&mut app, KeyCode::Char(other));

        handle_input(&mut app, KeyCode::Char('n'));
        assert_eq!(app.phase(), Phase::Finished);
        assert_eq!(app.engine().score(), 10);

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.engine().score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_fetch_delivers_result() {
        struct Fixed;

        #[async_trait::async_trait]
        impl QuestionLoader for Fixed {
            async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
                Ok(one_question())
            }
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_fetch(Arc::new(Fixed), tx);
        match rx.recv().await {
            Some(AppEvent::QuestionsLoaded(Ok(questions))) => assert_eq!(questions.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_loop_error_survives_restore_failure() {
        let result = finish(
            Err(QuizError::EmptyQuestionSet),
            Err(io::Error::other("tty gone")),
        );
        assert!(matches!(result, Err(QuizError::EmptyQuestionSet)));
    }

    #[test]
    fn test_restore_failure_alone_is_not_fatal() {
        assert!(finish(Ok(()), Err(io::Error::other("tty gone"))).is_ok());
    }
}
