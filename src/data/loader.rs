use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::QuestionSource;
use crate::error::FetchError;
use crate::models::Question;

use super::markup::decode_entities;
use super::opentdb::OpenTdbLoader;

/// Supplies a batch of questions for one quiz attempt.
#[async_trait]
pub trait QuestionLoader: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError>;
}

/// Build the loader described by the configured source.
pub fn loader_for(source: &QuestionSource) -> Arc<dyn QuestionLoader> {
    match source {
        QuestionSource::OpenTdb {
            base_url,
            amount,
            category,
            difficulty,
        } => Arc::new(OpenTdbLoader::new(
            base_url.clone(),
            *amount,
            *category,
            difficulty.clone(),
        )),
        QuestionSource::File { path } => Arc::new(JsonFileLoader::new(path.clone())),
    }
}

/// Reads a JSON array of questions from disk.
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl QuestionLoader for JsonFileLoader {
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let json_content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_questions(&self.path, &json_content)
    }
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, FetchError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_questions(path, &json_content)
}

fn parse_questions(path: &Path, json_content: &str) -> Result<Vec<Question>, FetchError> {
    let questions: Vec<Question> = serde_json::from_str(json_content)
        .map_err(|err| FetchError::Decode(format!("{}: {}", path.display(), err)))?;

    Ok(questions.into_iter().map(decode_question).collect())
}

pub(crate) fn decode_question(question: Question) -> Question {
    Question {
        text: decode_entities(&question.text),
        correct_answer: decode_entities(&question.correct_answer),
        incorrect_answers: question
            .incorrect_answers
            .iter()
            .map(|answer| decode_entities(answer))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_loader_reads_questions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(
            &path,
            r#"[{"question":"Who painted &quot;Guernica&quot;?","correct_answer":"Picasso","incorrect_answers":["Dal&iacute;","Mir&oacute;","Goya"]}]"#,
        )
        .unwrap();

        let questions = JsonFileLoader::new(path).fetch_questions().await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Who painted \"Guernica\"?");
        assert_eq!(questions[0].incorrect_answers[0], "Dalí");
    }

    #[tokio::test]
    async fn test_file_loader_missing_file() {
        let loader = JsonFileLoader::new(PathBuf::from("/nonexistent/questions.json"));
        assert!(matches!(
            loader.fetch_questions().await,
            Err(FetchError::Io { .. })
        ));
    }

    #[test]
    fn test_file_loader_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_questions_from_json(&path),
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_file_loader_bad_json_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "[{\"question\": 1}]").unwrap();
        assert!(matches!(
            JsonFileLoader::new(path).fetch_questions().await,
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_array_is_not_an_error_here() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "[]").unwrap();
        assert!(load_questions_from_json(&path).unwrap().is_empty());
    }
}
