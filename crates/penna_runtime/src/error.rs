//! Runtime error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("nothing to synthesize - the session has no recorded answers")]
    NoContent,

    #[error(transparent)]
    Llm(#[from] penna_llms::LlmError),

    #[error(transparent)]
    Core(#[from] penna_core::CoreError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

impl RuntimeError {
    /// Whether the caller should offer a retry for this failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            RuntimeError::Llm(e) => e.is_retryable(),
            _ => false,
        }
    }
}
