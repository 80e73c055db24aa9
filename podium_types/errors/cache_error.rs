use thiserror::Error;

/// Errors for leaderboard cache stuff. Never fatal to a request.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Leaderboard cache unavailable: {0}")]
    Unavailable(String),

    #[error("No cache entry for player '{0}'")]
    EntryNotFound(String),

    #[error("Ranked member '{0}' has no detail record")]
    MissingDetail(String),
}
