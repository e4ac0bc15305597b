//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the question source.
///
/// These are non-fatal: the quiz stays idle and the user may try again.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("question service returned HTTP {0}")]
    Status(u16),

    /// The service reported a non-zero response code.
    #[error("question service rejected the request (response code {0})")]
    Api(u8),

    /// The payload could not be decoded into questions.
    #[error("could not decode questions: {0}")]
    Decode(String),

    /// A local question file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// `start` was called without any questions.
    #[error("no questions to play")]
    EmptyQuestionSet,

    #[error("failed to load questions: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
