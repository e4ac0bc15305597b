//! Open Trivia Database client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::models::Question;

use super::loader::{QuestionLoader, decode_question};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches multiple-choice questions over HTTP.
pub struct OpenTdbLoader {
    base_url: String,
    amount: u32,
    category: u32,
    difficulty: String,
    client: reqwest::Client,
}

impl OpenTdbLoader {
    pub fn new(base_url: String, amount: u32, category: u32, difficulty: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            amount,
            category,
            difficulty,
            client,
        }
    }
}

#[derive(Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<Question>,
}

#[async_trait]
impl QuestionLoader for OpenTdbLoader {
    #[instrument(skip(self), fields(amount = self.amount, category = self.category))]
    async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let response = self
            .client
            .get(format!("{}/api.php", self.base_url))
            .query(&[
                ("amount", self.amount.to_string()),
                ("category", self.category.to_string()),
                ("difficulty", self.difficulty.clone()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status(status));
        }

        let body: OpenTdbResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        if body.response_code != 0 {
            return Err(FetchError::Api(body.response_code));
        }

        debug!(count = body.results.len(), "questions fetched");
        Ok(body.results.into_iter().map(decode_question).collect())
    }
}
