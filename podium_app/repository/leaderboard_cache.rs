use podium_types::{PlayerScore, errors::ApplicationError};

/// Fast ranking structure kept in front of the `ScoreRepository`.
///
/// A leaderboard is a ranked set identified by `rank_key` (member = player id,
/// ranked by score) plus one detail record per player holding its name and
/// score. Implementations must make each single-player write atomic.
#[async_trait::async_trait]
pub trait LeaderboardCache: Send + Sync {
    /// Moves the player to its new rank and refreshes its detail record.
    async fn upsert_entry(&self, rank_key: &str, player: &PlayerScore)
    -> Result<(), ApplicationError>;

    /// Returns all members, highest score first, with names from the detail
    /// records. A missing set yields an empty `Vec`: that is the cache miss.
    async fn read_ranked(&self, rank_key: &str) -> Result<Vec<PlayerScore>, ApplicationError>;

    /// Returns a single player's detail record.
    async fn read_one(&self, player_id: &str) -> Result<PlayerScore, ApplicationError>;

    /// Adds (or overwrites) one member and its detail record.
    async fn insert_one(
        &self,
        rank_key: &str,
        player_id: &str,
        player_name: &str,
        score: i64,
    ) -> Result<(), ApplicationError>;
}
