//! Quiz configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! playable setup against the public trivia service.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionSource {
    /// Open Trivia Database style HTTP endpoint.
    OpenTdb {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_amount")]
        amount: u32,
        #[serde(default = "default_category")]
        category: u32,
        #[serde(default = "default_difficulty")]
        difficulty: String,
    },
    /// A local JSON array of questions.
    File { path: PathBuf },
}

impl Default for QuestionSource {
    fn default() -> Self {
        Self::OpenTdb {
            base_url: default_base_url(),
            amount: default_amount(),
            category: default_category(),
            difficulty: default_difficulty(),
        }
    }
}

impl QuestionSource {
    /// Short description of the question set for the welcome screen.
    pub fn describe(&self) -> String {
        match self {
            Self::OpenTdb { amount: 1, .. } => "1 question".to_string(),
            Self::OpenTdb { amount, .. } => format!("{amount} questions"),
            Self::File { path } => match path.file_name() {
                Some(name) => format!("Questions from {}", name.to_string_lossy()),
                None => "Questions from file".to_string(),
            },
        }
    }
}

fn default_base_url() -> String {
    "https://opentdb.com".to_string()
}
fn default_amount() -> u32 {
    20
}
fn default_category() -> u32 {
    9
}
fn default_difficulty() -> String {
    "easy".to_string()
}
fn default_time_limit() -> u32 {
    15
}
fn default_reveal_delay() -> u64 {
    1500
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Seconds allowed per question.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u32,
    /// Pause after a time-up before moving on, in milliseconds.
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,
    /// Log destination. Logging is off when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub source: QuestionSource,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            reveal_delay_ms: default_reveal_delay(),
            log_file: None,
            source: QuestionSource::default(),
        }
    }
}

impl QuizConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_secs == 0 {
            return Err(ConfigError::Invalid(
                "time_limit_secs must be at least 1".to_string(),
            ));
        }
        if let QuestionSource::OpenTdb { amount, .. } = &self.source {
            if *amount == 0 {
                return Err(ConfigError::Invalid("amount must be at least 1".to_string()));
            }
        }
        Ok(())
    }

    /// Override the number of fetched questions. Ignored for file sources.
    pub fn set_amount(&mut self, value: u32) {
        if let QuestionSource::OpenTdb { amount, .. } = &mut self.source {
            *amount = value;
        }
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
