use thiserror::Error;

/// Errors raised by the durable score store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Score store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write player score: {0}")]
    Write(String),

    #[error("Failed to read player scores: {0}")]
    Read(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
