use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("store error: {0}")]
    Store(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
