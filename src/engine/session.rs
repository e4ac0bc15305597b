//! Quiz session state machine.
//!
//! All transitions are total: calling an operation in a state where it does
//! not apply leaves the session untouched and reports `Ignored`/`false`.

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::QuizError;
use crate::models::Question;

/// Seconds per question unless configured otherwise.
pub const DEFAULT_TIME_LIMIT: u32 = 15;

/// Points awarded for each correct answer.
pub const POINTS_PER_QUESTION: u32 = 10;

/// A locked-in answer for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The user picked this option text.
    Choice(String),
    /// The countdown ran out first. Never matches any option.
    TimeUp,
}

impl Answer {
    pub fn choice(&self) -> Option<&str> {
        match self {
            Answer::Choice(choice) => Some(choice),
            Answer::TimeUp => None,
        }
    }

    pub fn is_correct_for(&self, question: &Question) -> bool {
        self.choice().is_some_and(|choice| question.is_correct(choice))
    }
}

/// Coarse session phase, as seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    InProgress,
    Finished,
}

/// State of a quiz attempt that is being played.
#[derive(Debug, Clone)]
pub struct Round {
    session_id: Uuid,
    questions: Vec<Question>,
    index: usize,
    score: u32,
    selected: Option<Answer>,
    time_remaining: u32,
    locked: Vec<Answer>,
}

impl Round {
    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }
}

/// Outcome of a completed attempt.
#[derive(Debug, Clone)]
pub struct Summary {
    session_id: Uuid,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    score: u32,
}

impl Summary {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        max_score(self.questions.len())
    }
}

/// The session, one variant per phase.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    InProgress(Round),
    Finished(Summary),
}

/// Result of a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Ticked,
    /// The timer hit zero and the question was locked as timed out.
    TimedOut,
}

/// Result of moving past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Ignored,
    NextQuestion,
    Finished,
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub phase: Phase,
    pub current_index: usize,
    pub total: usize,
    pub score: u32,
    pub max_score: u32,
    pub time_remaining: u32,
    pub progress: f64,
    pub is_last_question: bool,
    pub can_answer: bool,
    pub can_advance: bool,
    pub time_up: bool,
}

fn max_score(questions: usize) -> u32 {
    POINTS_PER_QUESTION * questions as u32
}

pub struct QuizEngine {
    state: SessionState,
    time_limit: u32,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::with_time_limit(DEFAULT_TIME_LIMIT)
    }

    pub fn with_time_limit(time_limit: u32) -> Self {
        Self {
            state: SessionState::Idle,
            time_limit: time_limit.max(1),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Loading => Phase::Loading,
            SessionState::InProgress(_) => Phase::InProgress,
            SessionState::Finished(_) => Phase::Finished,
        }
    }

    /// Mark a question fetch as in flight. Only valid from `Idle`.
    pub fn begin_loading(&mut self) -> bool {
        if matches!(self.state, SessionState::Idle) {
            self.state = SessionState::Loading;
            true
        } else {
            false
        }
    }

    /// Abandon an in-flight fetch.
    pub fn load_failed(&mut self) {
        if matches!(self.state, SessionState::Loading) {
            self.state = SessionState::Idle;
        }
    }

    /// Begin a new attempt with a fresh question set, replacing any session.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.is_empty() {
            self.state = SessionState::Idle;
            return Err(QuizError::EmptyQuestionSet);
        }

        let round = Round {
            session_id: Uuid::new_v4(),
            locked: Vec::with_capacity(questions.len()),
            questions,
            index: 0,
            score: 0,
            selected: None,
            time_remaining: self.time_limit,
        };
        info!(
            session = %round.session_id,
            questions = round.questions.len(),
            "quiz started"
        );
        self.state = SessionState::InProgress(round);
        Ok(())
    }

    /// Count one second off the current question.
    pub fn tick(&mut self) -> TickOutcome {
        let SessionState::InProgress(round) = &mut self.state else {
            return TickOutcome::Ignored;
        };
        if round.selected.is_some() || round.time_remaining == 0 {
            return TickOutcome::Ignored;
        }

        round.time_remaining -= 1;
        if round.time_remaining > 0 {
            return TickOutcome::Ticked;
        }

        round.selected = Some(Answer::TimeUp);
        info!(session = %round.session_id, question = round.index, "time up");
        TickOutcome::TimedOut
    }

    /// Lock in `choice` for the current question. First answer wins.
    pub fn answer(&mut self, choice: &str) -> bool {
        let SessionState::InProgress(round) = &mut self.state else {
            return false;
        };
        if round.selected.is_some() || round.time_remaining == 0 {
            return false;
        }

        round.selected = Some(Answer::Choice(choice.to_string()));
        debug!(
            session = %round.session_id,
            question = round.index,
            correct = round.current_question().is_correct(choice),
            "answer locked"
        );
        true
    }

    /// Score the answered question and move on, or finish after the last one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let SessionState::InProgress(round) = &mut self.state else {
            return AdvanceOutcome::Ignored;
        };
        let Some(answer) = round.selected.take() else {
            return AdvanceOutcome::Ignored;
        };

        if answer.is_correct_for(round.current_question()) {
            round.score += POINTS_PER_QUESTION;
        }
        round.locked.push(answer);

        if !round.is_last_question() {
            round.index += 1;
            round.time_remaining = self.time_limit;
            return AdvanceOutcome::NextQuestion;
        }

        let SessionState::InProgress(round) = std::mem::take(&mut self.state) else {
            return AdvanceOutcome::Ignored;
        };
        info!(
            session = %round.session_id,
            score = round.score,
            max = max_score(round.questions.len()),
            "quiz finished"
        );
        self.state = SessionState::Finished(Summary {
            session_id: round.session_id,
            questions: round.questions,
            answers: round.locked,
            score: round.score,
        });
        AdvanceOutcome::Finished
    }

    /// Drop the session and go back to `Idle`.
    pub fn restart(&mut self) {
        if let SessionState::Finished(summary) = &self.state {
            debug!(session = %summary.session_id, "restarting");
        }
        self.state = SessionState::Idle;
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.state {
            SessionState::InProgress(round) => Some(round),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.state {
            SessionState::Finished(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.round().map(Round::current_question)
    }

    pub fn selected_answer(&self) -> Option<&Answer> {
        self.round().and_then(|round| round.selected.as_ref())
    }

    pub fn current_index(&self) -> usize {
        match &self.state {
            SessionState::InProgress(round) => round.index,
            SessionState::Finished(summary) => summary.questions.len() - 1,
            _ => 0,
        }
    }

    pub fn total_questions(&self) -> usize {
        match &self.state {
            SessionState::InProgress(round) => round.questions.len(),
            SessionState::Finished(summary) => summary.questions.len(),
            _ => 0,
        }
    }

    pub fn score(&self) -> u32 {
        match &self.state {
            SessionState::InProgress(round) => round.score,
            SessionState::Finished(summary) => summary.score,
            _ => 0,
        }
    }

    pub fn time_remaining(&self) -> u32 {
        self.round()
            .map_or(self.time_limit, |round| round.time_remaining)
    }

    /// Fraction of questions completed, from 0.0 up to 1.0 at the end.
    pub fn progress(&self) -> f64 {
        match &self.state {
            SessionState::InProgress(round) => round.index as f64 / round.questions.len() as f64,
            SessionState::Finished(_) => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.round().is_some_and(Round::is_last_question)
    }

    pub fn is_time_up(&self) -> bool {
        self.round().is_some_and(|round| round.time_remaining == 0)
    }

    pub fn can_answer(&self) -> bool {
        self.round()
            .is_some_and(|round| round.selected.is_none() && round.time_remaining > 0)
    }

    pub fn can_advance(&self) -> bool {
        self.round().is_some_and(|round| round.selected.is_some())
    }

    pub fn view(&self) -> QuizView {
        QuizView {
            phase: self.phase(),
            current_index: self.current_index(),
            total: self.total_questions(),
            score: self.score(),
            max_score: max_score(self.total_questions()),
            time_remaining: self.time_remaining(),
            progress: self.progress(),
            is_last_question: self.is_last_question(),
            can_answer: self.can_answer(),
            can_advance: self.can_advance(),
            time_up: self.is_time_up(),
        }
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}
