use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key configured for provider '{0}'")]
    MissingApiKey(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("provider returned {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;

impl LlmError {
    /// Single-call failures that make sense to retry at the call site.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout(_) | LlmError::Protocol { .. } | LlmError::Http(_)
        )
    }
}
