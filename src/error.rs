//! Error type shared by every module of the study assistant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("No option selected for question {0}")]
    NoAnswerSelected(usize),

    #[error("Quiz is already finished")]
    QuizFinished,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
