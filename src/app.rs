use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::config::QuizConfig;
use crate::engine::{AdvanceOutcome, Phase, QuizEngine, ScheduledTask, TickOutcome};
use crate::error::FetchError;
use crate::models::Question;
use crate::presenter::{OptionPresenter, OptionStatus, status_of};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events delivered to the app from scheduled tasks and background work.
#[derive(Debug)]
pub enum AppEvent {
    Tick { generation: u64 },
    AutoAdvance { generation: u64 },
    QuestionsLoaded(Result<Vec<Question>, FetchError>),
}

/// Side effects the event loop must carry out for the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FetchQuestions,
    Quit,
}

pub struct App {
    engine: QuizEngine,
    presenter: OptionPresenter,
    events: UnboundedSender<AppEvent>,
    reveal_delay: Duration,
    generation: u64,
    ticker: Option<ScheduledTask>,
    auto_advance: Option<ScheduledTask>,
    cursor: usize,
    result_scroll: usize,
    notice: Option<String>,
    source_label: String,
}

impl App {
    pub fn new(config: &QuizConfig, events: UnboundedSender<AppEvent>) -> Self {
        Self::with_presenter(config, events, OptionPresenter::new())
    }

    pub fn with_presenter(
        config: &QuizConfig,
        events: UnboundedSender<AppEvent>,
        presenter: OptionPresenter,
    ) -> Self {
        Self {
            engine: QuizEngine::with_time_limit(config.time_limit_secs),
            presenter,
            events,
            reveal_delay: config.reveal_delay(),
            generation: 0,
            ticker: None,
            auto_advance: None,
            cursor: 0,
            result_scroll: 0,
            notice: None,
            source_label: config.source.describe(),
        }
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn is_counting_down(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn is_auto_advance_pending(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// Options of the current question in display order, shuffling on first use.
    pub fn current_options(&mut self) -> Vec<String> {
        let index = self.engine.current_index();
        match self.engine.current_question() {
            Some(question) => self
                .presenter
                .options(index, &question.correct_answer, &question.incorrect_answers)
                .to_vec(),
            None => Vec::new(),
        }
    }

    /// Memoised options with their status, for rendering.
    pub fn option_rows(&self) -> Vec<(String, OptionStatus)> {
        let Some(question) = self.engine.current_question() else {
            return Vec::new();
        };
        let selected = self.engine.selected_answer();
        let time_up = self.engine.is_time_up();

        self.presenter
            .current()
            .iter()
            .map(|option| {
                let status = status_of(option, selected, time_up, &question.correct_answer);
                (option.clone(), status)
            })
            .collect()
    }

    /// Leave the welcome screen and ask for questions.
    pub fn request_start(&mut self) -> Option<Action> {
        if !self.engine.begin_loading() {
            return None;
        }
        self.notice = None;
        Some(Action::FetchQuestions)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick { generation } if generation == self.generation => self.on_tick(),
            AppEvent::AutoAdvance { generation } if generation == self.generation => {
                self.auto_advance = None;
                self.advance();
            }
            AppEvent::Tick { .. } | AppEvent::AutoAdvance { .. } => {
                debug!("dropping stale timer event");
            }
            AppEvent::QuestionsLoaded(result) => self.on_questions_loaded(result),
        }
    }

    fn on_questions_loaded(&mut self, result: Result<Vec<Question>, FetchError>) {
        if self.engine.phase() != Phase::Loading {
            return;
        }

        let questions = match result {
            Ok(questions) => questions,
            Err(err) => {
                warn!(error = %err, "question fetch failed");
                self.engine.load_failed();
                self.notice = Some(err.to_string());
                return;
            }
        };

        match self.engine.start(questions) {
            Ok(()) => self.begin_question(),
            Err(err) => {
                warn!(error = %err, "could not start quiz");
                self.notice = Some(err.to_string());
            }
        }
    }

    fn on_tick(&mut self) {
        match self.engine.tick() {
            TickOutcome::Ticked => {}
            TickOutcome::TimedOut => {
                self.cancel_timers();
                self.auto_advance = Some(ScheduledTask::once(
                    self.reveal_delay,
                    self.events.clone(),
                    AppEvent::AutoAdvance {
                        generation: self.generation,
                    },
                ));
            }
            TickOutcome::Ignored => self.cancel_timers(),
        }
    }

    /// Click the option at `index` in display order.
    pub fn click_option(&mut self, index: usize) -> bool {
        let options = self.current_options();
        let Some(option) = options.get(index) else {
            return false;
        };
        let Some(question) = self.engine.current_question() else {
            return false;
        };

        let accepted = OptionPresenter::click(
            option,
            self.engine.selected_answer(),
            self.engine.is_time_up(),
            &question.correct_answer,
        )
        .is_some_and(|choice| self.engine.answer(choice));

        if accepted {
            self.cursor = index;
            self.cancel_timers();
        }
        accepted
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        let outcome = self.engine.advance();
        match outcome {
            AdvanceOutcome::NextQuestion => self.begin_question(),
            AdvanceOutcome::Finished => {
                self.cancel_timers();
                self.result_scroll = 0;
            }
            AdvanceOutcome::Ignored => {}
        }
        outcome
    }

    pub fn restart(&mut self) {
        self.cancel_timers();
        self.engine.restart();
        self.presenter.reset();
        self.cursor = 0;
        self.result_scroll = 0;
        info!("back to welcome screen");
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Enter/Space: answer while the question is open, otherwise move on.
    pub fn confirm(&mut self) {
        if self.engine.can_answer() {
            self.click_option(self.cursor);
        } else if self.engine.can_advance() {
            self.advance();
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.engine.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn option_count(&self) -> usize {
        self.engine
            .current_question()
            .map_or(0, Question::option_count)
    }

    fn begin_question(&mut self) {
        self.cancel_timers();
        self.cursor = 0;
        self.current_options();
        let generation = self.generation;
        self.ticker = Some(ScheduledTask::every(
            TICK_PERIOD,
            self.events.clone(),
            move || AppEvent::Tick { generation },
        ));
    }

    fn cancel_timers(&mut self) {
        self.generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        if let Some(pending) = self.auto_advance.take() {
            pending.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Answer;
    use tokio::sync::mpsc;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("Capital of France?", "Paris", ["Rome", "Berlin", "Madrid"]),
            Question::new("Capital of Japan?", "Tokyo", ["Kyoto", "Osaka", "Nagoya"]),
        ]
    }

    fn loaded_app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::with_presenter(&QuizConfig::default(), tx, OptionPresenter::seeded(5));
        assert_eq!(app.request_start(), Some(Action::FetchQuestions));
        app.handle_event(AppEvent::QuestionsLoaded(Ok(questions())));
        (app, rx)
    }

    fn index_of(app: &mut App, option: &str) -> usize {
        app.current_options()
            .iter()
            .position(|o| o == option)
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_loaded_questions_start_countdown() {
        let (app, _rx) = loaded_app();
        assert_eq!(app.phase(), Phase::InProgress);
        assert!(app.is_counting_down());
        assert_eq!(app.option_rows().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_shows_notice() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&QuizConfig::default(), tx);
        app.request_start();
        app.handle_event(AppEvent::QuestionsLoaded(Err(FetchError::Status(500))));
        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.notice().unwrap().contains("500"));
        assert_eq!(app.request_start(), Some(Action::FetchQuestions));
        assert!(app.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_fetch_shows_notice() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&QuizConfig::default(), tx);
        app.request_start();
        app.handle_event(AppEvent::QuestionsLoaded(Ok(Vec::new())));
        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.notice(), Some("no questions to play"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_cancels_countdown() {
        let (mut app, _rx) = loaded_app();
        let paris = index_of(&mut app, "Paris");
        assert!(app.click_option(paris));
        assert!(!app.is_counting_down());

        let rome = index_of(&mut app, "Rome");
        assert!(!app.click_option(rome));
        assert_eq!(app.engine().selected_answer().and_then(|a| a.choice()), Some("Paris"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_dropped() {
        let (mut app, _rx) = loaded_app();
        let stale = app.generation;
        let paris = index_of(&mut app, "Paris");
        app.click_option(paris);
        app.advance();

        app.handle_event(AppEvent::Tick { generation: stale });
        assert_eq!(app.engine().time_remaining(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_schedules_auto_advance() {
        let (mut app, mut rx) = loaded_app();

        tokio::time::sleep(Duration::from_millis(15_500)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        assert!(app.engine().is_time_up());
        assert!(app.is_auto_advance_pending());
        assert!(!app.is_counting_down());

        tokio::time::sleep(Duration::from_millis(1_600)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        assert_eq!(app.engine().current_index(), 1);
        assert_eq!(app.engine().score(), 0);
        assert!(app.is_counting_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_question_timeout_finishes_quiz() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::with_presenter(&QuizConfig::default(), tx, OptionPresenter::seeded(5));
        app.request_start();
        app.handle_event(AppEvent::QuestionsLoaded(Ok(vec![Question::new(
            "Largest planet?",
            "Jupiter",
            ["Saturn", "Mars", "Venus"],
        )])));

        tokio::time::sleep(Duration::from_millis(15_500)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        assert_eq!(app.phase(), Phase::InProgress);
        assert!(app.is_auto_advance_pending());

        tokio::time::sleep(Duration::from_millis(1_600)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        assert_eq!(app.phase(), Phase::Finished);
        assert_eq!(app.engine().score(), 0);
        let summary = app.engine().summary().unwrap();
        assert_eq!(summary.answers(), &[Answer::TimeUp]);
        assert!(!app.is_counting_down());
        assert!(!app.is_auto_advance_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_welcome_names_question_count() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let app = App::new(&QuizConfig::default(), tx);
        assert_eq!(app.source_label(), "20 questions");

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = QuizConfig::default();
        config.source = crate::config::QuestionSource::File {
            path: "trivia.json".into(),
        };
        assert_eq!(App::new(&config, tx).source_label(), "Questions from trivia.json");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_pending_advance() {
        let (mut app, mut rx) = loaded_app();
        for _ in 0..15 {
            app.handle_event(AppEvent::Tick {
                generation: app.generation,
            });
        }
        assert!(app.is_auto_advance_pending());

        app.restart();
        tokio::time::sleep(Duration::from_secs(3)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!app.is_auto_advance_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_answers_then_advances() {
        let (mut app, _rx) = loaded_app();
        app.confirm();
        assert!(app.engine().can_advance());
        app.confirm();
        assert_eq!(app.engine().current_index(), 1);
        assert_eq!(app.cursor(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_wraps() {
        let (mut app, _rx) = loaded_app();
        app.select_previous_option();
        assert_eq!(app.cursor(), 3);
        app.select_next_option();
        assert_eq!(app.cursor(), 0);
    }
}
