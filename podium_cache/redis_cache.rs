use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::ConnectionManager};
use std::collections::HashMap;

use podium_app::repository::LeaderboardCache;
use podium_types::{
    PlayerScore,
    errors::{ApplicationError, CacheError},
};

const NAME_FIELD: &str = "player_name";
const SCORE_FIELD: &str = "score";

/// Leaderboard cache on a Redis server.
///
/// Each rank key is a sorted set of player ids scored by points. Every player
/// also has a `player:<id>` hash with its name and score. Both are written in
/// one `MULTI`/`EXEC` transaction.
#[derive(Clone)]
pub struct RedisLeaderboardCache {
    conn: ConnectionManager,
}

impl RedisLeaderboardCache {
    pub async fn connect(url: &str) -> Result<Self, ApplicationError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(unavailable)?;
        tracing::info!("Connected to Redis leaderboard cache");

        Ok(Self { conn })
    }

    async fn write(
        &self,
        rank_key: &str,
        player_id: &str,
        player_name: &str,
        score: i64,
    ) -> Result<(), ApplicationError> {
        let mut conn = self.conn.clone();
        let () = redis::pipe()
            .atomic()
            .zadd(rank_key, player_id, score)
            .ignore()
            .hset_multiple(
                detail_key(player_id),
                &[
                    (NAME_FIELD, player_name.to_string()),
                    (SCORE_FIELD, score.to_string()),
                ],
            )
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}

fn detail_key(player_id: &str) -> String {
    format!("player:{player_id}")
}

fn unavailable(e: RedisError) -> ApplicationError {
    CacheError::Unavailable(e.to_string()).into()
}

#[async_trait]
impl LeaderboardCache for RedisLeaderboardCache {
    async fn upsert_entry(
        &self,
        rank_key: &str,
        player: &PlayerScore,
    ) -> Result<(), ApplicationError> {
        self.write(rank_key, &player.player_id, &player.player_name, player.score)
            .await
    }

    async fn read_ranked(&self, rank_key: &str) -> Result<Vec<PlayerScore>, ApplicationError> {
        let mut conn = self.conn.clone();
        let members: Vec<(String, f64)> = conn
            .zrevrange_withscores(rank_key, 0, -1)
            .await
            .map_err(unavailable)?;
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut lookups = redis::pipe();
        for (player_id, _) in &members {
            lookups.hget(detail_key(player_id), NAME_FIELD);
        }
        let names: Vec<Option<String>> = lookups.query_async(&mut conn).await.map_err(unavailable)?;

        members
            .into_iter()
            .zip(names)
            .map(|((player_id, score), name)| -> Result<PlayerScore, ApplicationError> {
                let player_name =
                    name.ok_or_else(|| CacheError::MissingDetail(player_id.clone()))?;
                Ok(PlayerScore::new(player_id, player_name, score as i64))
            })
            .collect()
    }

    async fn read_one(&self, player_id: &str) -> Result<PlayerScore, ApplicationError> {
        let mut conn = self.conn.clone();
        let detail: HashMap<String, String> = conn
            .hgetall(detail_key(player_id))
            .await
            .map_err(unavailable)?;

        let player_name = detail.get(NAME_FIELD);
        let score = detail.get(SCORE_FIELD).and_then(|s| s.parse::<i64>().ok());
        let (Some(player_name), Some(score)) = (player_name, score) else {
            return Err(CacheError::EntryNotFound(player_id.to_string()).into());
        };

        Ok(PlayerScore::new(player_id, player_name.clone(), score))
    }

    async fn insert_one(
        &self,
        rank_key: &str,
        player_id: &str,
        player_name: &str,
        score: i64,
    ) -> Result<(), ApplicationError> {
        self.write(rank_key, player_id, player_name, score).await
    }
}
