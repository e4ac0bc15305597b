//! Quiz state machine and its countdown plumbing.

mod session;
mod timer;

pub use session::{
    AdvanceOutcome, Answer, DEFAULT_TIME_LIMIT, POINTS_PER_QUESTION, Phase, QuizEngine,
    QuizView, Round, SessionState, Summary, TickOutcome,
};
pub use timer::ScheduledTask;
