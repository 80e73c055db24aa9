use podium_types::{
    PlayerScore,
    errors::{ApplicationError, StoreError},
};

use crate::models::{self as db_models};

impl From<db_models::PlayerScore> for PlayerScore {
    fn from(row: db_models::PlayerScore) -> Self {
        PlayerScore {
            player_id: row.player_id,
            player_name: row.player_name,
            score: row.score,
        }
    }
}

/// True for failures that mean the database could not be reached at all.
pub fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

pub fn write_error(err: sqlx::Error) -> ApplicationError {
    if is_unavailable(&err) {
        StoreError::Unavailable(err.to_string()).into()
    } else {
        StoreError::Write(err.to_string()).into()
    }
}

pub fn read_error(err: sqlx::Error) -> ApplicationError {
    if is_unavailable(&err) {
        StoreError::Unavailable(err.to_string()).into()
    } else {
        StoreError::Read(err.to_string()).into()
    }
}
