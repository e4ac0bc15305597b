use serde::{Deserialize, Serialize};

/// One multiple-choice question.
///
/// `text` may carry inline markup and is displayed as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            text: text.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of options shown for this question.
    pub fn option_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_accepts_both_text_keys() {
        let json = r#"{"question":"Capital of France?","correct_answer":"Paris","incorrect_answers":["Rome","Berlin","Madrid"]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.text, "Capital of France?");
        assert_eq!(question.option_count(), 4);

        let json = r#"{"text":"2 + 2?","correct_answer":"4","incorrect_answers":["3"]}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.text, "2 + 2?");
        assert!(question.is_correct("4"));
        assert!(!question.is_correct("3"));
    }
}
