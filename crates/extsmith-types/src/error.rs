//! Error taxonomy for conversation and generation operations.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the conversation service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyInput,

    #[error("no API key configured")]
    MissingCredential,

    #[error("upstream model call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("model response was not parseable: {0}")]
    MalformedResponse(String),
}

/// Errors from the bundle generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("archive error: {0}")]
    Archive(String),
}
