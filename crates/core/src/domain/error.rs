// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown job kind: {0}")]
    UnknownJobKind(String),

    #[error("Invalid task description: {0}")]
    InvalidTaskDescription(String),

    #[error("API key must not be empty")]
    EmptyApiKey,
}

pub type Result<T> = std::result::Result<T, DomainError>;
