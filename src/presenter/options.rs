//! Option ordering and answer-state styling for one question.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::engine::Answer;

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    /// Nothing locked yet, option is clickable.
    Neutral,
    /// The right answer, shown after the user picked something else or ran out of time.
    CorrectRevealed,
    CorrectSelected,
    IncorrectSelected,
    Disabled,
}

impl OptionStatus {
    pub fn is_clickable(self) -> bool {
        self == OptionStatus::Neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    question_id: usize,
    correct: String,
    incorrect: Vec<String>,
}

/// Shuffles a question's options once and keeps that order until the
/// question changes.
pub struct OptionPresenter {
    rng: StdRng,
    memo: Option<(OrderKey, Vec<String>)>,
}

impl OptionPresenter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            memo: None,
        }
    }

    /// Deterministic shuffles, for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            memo: None,
        }
    }

    /// Display order for the question identified by `question_id`.
    ///
    /// The same id and answer set always yield the same order; anything else
    /// reshuffles. Duplicate option texts are kept.
    pub fn options(&mut self, question_id: usize, correct: &str, incorrect: &[String]) -> &[String] {
        let fresh = !self.memo.as_ref().is_some_and(|(key, _)| {
            key.question_id == question_id && key.correct == correct && key.incorrect == incorrect
        });

        if fresh {
            let mut order: Vec<String> = incorrect.to_vec();
            order.push(correct.to_string());
            order.shuffle(&mut self.rng);

            let key = OrderKey {
                question_id,
                correct: correct.to_string(),
                incorrect: incorrect.to_vec(),
            };
            self.memo = Some((key, order));
        }

        self.memo
            .as_ref()
            .map(|(_, order)| order.as_slice())
            .unwrap_or(&[])
    }

    /// The currently memoised order, if any.
    pub fn current(&self) -> &[String] {
        self.memo
            .as_ref()
            .map(|(_, order)| order.as_slice())
            .unwrap_or(&[])
    }

    /// Forget the memoised order.
    pub fn reset(&mut self) {
        self.memo = None;
    }

    /// Forward a click only if the option is still clickable.
    pub fn click<'a>(
        option: &'a str,
        selected: Option<&Answer>,
        time_up: bool,
        correct: &str,
    ) -> Option<&'a str> {
        status_of(option, selected, time_up, correct)
            .is_clickable()
            .then_some(option)
    }
}

impl Default for OptionPresenter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn status_of(
    option: &str,
    selected: Option<&Answer>,
    time_up: bool,
    correct: &str,
) -> OptionStatus {
    if selected.is_none() && !time_up {
        return OptionStatus::Neutral;
    }

    let picked = selected.and_then(Answer::choice) == Some(option);
    match (option == correct, picked) {
        (true, true) => OptionStatus::CorrectSelected,
        (true, false) => OptionStatus::CorrectRevealed,
        (false, true) => OptionStatus::IncorrectSelected,
        (false, false) => OptionStatus::Disabled,
    }
}
