use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use podium_app::repository::LeaderboardCache;
use podium_types::{
    PlayerScore,
    errors::{ApplicationError, CacheError},
};

use crate::keyspace::Keyspace;

/// Process-local leaderboard cache shaped like a sorted-set store: one ranked
/// set per rank key and one detail record per player.
///
/// A single lock guards the whole keyspace, so every write updates rank and
/// detail record together.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLeaderboardCache {
    keyspace: Arc<RwLock<Keyspace>>,
}

impl InMemoryLeaderboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members in the ranked set, 0 when it does not exist.
    pub async fn ranked_len(&self, rank_key: &str) -> usize {
        self.keyspace
            .read()
            .await
            .sets
            .get(rank_key)
            .map_or(0, |set| set.len())
    }
}

#[async_trait]
impl LeaderboardCache for InMemoryLeaderboardCache {
    async fn upsert_entry(
        &self,
        rank_key: &str,
        player: &PlayerScore,
    ) -> Result<(), ApplicationError> {
        let mut keyspace = self.keyspace.write().await;
        keyspace.put(rank_key, &player.player_id, &player.player_name, player.score);
        Ok(())
    }

    async fn read_ranked(&self, rank_key: &str) -> Result<Vec<PlayerScore>, ApplicationError> {
        let keyspace = self.keyspace.read().await;
        let Some(set) = keyspace.sets.get(rank_key) else {
            return Ok(Vec::new());
        };

        let mut ranked = Vec::with_capacity(set.len());
        for (player_id, score) in set.iter_desc() {
            let detail = keyspace
                .details
                .get(player_id)
                .ok_or_else(|| CacheError::MissingDetail(player_id.to_string()))?;

            ranked.push(PlayerScore::new(player_id, detail.player_name.clone(), score));
        }

        Ok(ranked)
    }

    async fn read_one(&self, player_id: &str) -> Result<PlayerScore, ApplicationError> {
        let keyspace = self.keyspace.read().await;
        let detail = keyspace
            .details
            .get(player_id)
            .ok_or_else(|| CacheError::EntryNotFound(player_id.to_string()))?;

        Ok(PlayerScore::new(
            player_id,
            detail.player_name.clone(),
            detail.score,
        ))
    }

    async fn insert_one(
        &self,
        rank_key: &str,
        player_id: &str,
        player_name: &str,
        score: i64,
    ) -> Result<(), ApplicationError> {
        let mut keyspace = self.keyspace.write().await;
        keyspace.put(rank_key, player_id, player_name, score);
        Ok(())
    }
}
