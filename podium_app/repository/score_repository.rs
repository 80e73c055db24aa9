use podium_types::{PlayerScore, errors::ApplicationError};

/// The durable, authoritative store of player scores.
#[async_trait::async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Creates the player's record, or replaces name and score if it exists.
    async fn upsert(&self, player: &PlayerScore) -> Result<(), ApplicationError>;

    /// Returns every record, highest score first.
    async fn top_players(&self) -> Result<Vec<PlayerScore>, ApplicationError>;

    /// Returns the score of a single player, or `PlayerNotFound`.
    async fn get_score(&self, player_id: &str) -> Result<i64, ApplicationError>;
}
