//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{OptionLabel, QuestionSetError};

use crate::sessions::Phase;

/// Errors emitted by `QuizSession` operations.
///
/// `InvalidQuestionSet` comes from bad provider data. Every other variant means
/// an operation was called out of sequence by the presenter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid question set: {0}")]
    InvalidQuestionSet(#[from] QuestionSetError),

    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: Phase,
    },

    #[error("option {0} does not exist for the current question")]
    UnknownOption(OptionLabel),

    #[error("no option selected")]
    NoSelection,

    #[error("answer already submitted for this question")]
    AlreadySubmitted,
}

/// Errors emitted by question providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("no questions were returned")]
    Empty,

    #[error("question service returned HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("question service rejected the request (code {code}): {message}")]
    Api { code: u8, message: &'static str },

    #[error("could not reach question service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not read question file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question data: {0}")]
    Parse(#[from] serde_json::Error),
}
