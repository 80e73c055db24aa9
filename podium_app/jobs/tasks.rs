use async_trait::async_trait;
use std::sync::Arc;

use podium_types::PlayerScore;

use crate::{jobs::BackgroundTask, repository::LeaderboardCache};

/// Writes a freshly persisted score through to the leaderboard cache.
pub struct RefreshCacheEntryTask {
    cache: Arc<dyn LeaderboardCache>,
    rank_key: String,
    player: PlayerScore,
}

impl RefreshCacheEntryTask {
    pub fn new(cache: Arc<dyn LeaderboardCache>, rank_key: &str, player: PlayerScore) -> Self {
        Self {
            cache,
            rank_key: rank_key.to_string(),
            player,
        }
    }
}

#[async_trait]
impl BackgroundTask for RefreshCacheEntryTask {
    fn name(&self) -> &'static str {
        "RefreshCacheEntry"
    }

    async fn run(self: Box<Self>) {
        let player_id = self.player.player_id.as_str();
        match self.cache.upsert_entry(&self.rank_key, &self.player).await {
            Ok(()) => tracing::info!(player_id, "Player cache updated successfully"),
            Err(e) => tracing::error!(player_id, "Error updating the cache for player: {e}"),
        }
    }
}

/// Refills the leaderboard cache from a score store scan after a cache miss.
///
/// Every record is inserted on its own: a failed insert is logged and the
/// rest still go through. Nothing is retried.
pub struct RepopulateLeaderboardTask {
    cache: Arc<dyn LeaderboardCache>,
    rank_key: String,
    players: Vec<PlayerScore>,
}

impl RepopulateLeaderboardTask {
    pub fn new(cache: Arc<dyn LeaderboardCache>, rank_key: &str, players: Vec<PlayerScore>) -> Self {
        Self {
            cache,
            rank_key: rank_key.to_string(),
            players,
        }
    }
}

#[async_trait]
impl BackgroundTask for RepopulateLeaderboardTask {
    fn name(&self) -> &'static str {
        "RepopulateLeaderboard"
    }

    async fn run(self: Box<Self>) {
        let mut failed = 0usize;

        for player in &self.players {
            let player_id = player.player_id.as_str();
            let result = self
                .cache
                .insert_one(&self.rank_key, player_id, &player.player_name, player.score)
                .await;

            match result {
                Ok(()) => tracing::debug!(player_id, "Player score cached successfully"),
                Err(e) => {
                    failed += 1;
                    tracing::error!(player_id, "Error inserting new record into cache: {e}");
                }
            }
        }

        tracing::info!(
            count = self.players.len(),
            failed,
            "Leaderboard cache repopulation finished"
        );
    }
}
