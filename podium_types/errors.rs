use thiserror::Error;

pub mod cache_error;
pub mod store_error;

pub use cache_error::CacheError;
pub use store_error::StoreError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Player with ID '{0}' not found")]
    PlayerNotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}
