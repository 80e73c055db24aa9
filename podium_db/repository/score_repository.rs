use sqlx::PgPool;

use podium_app::repository::ScoreRepository;
use podium_types::{
    PlayerScore, Result,
    errors::ApplicationError,
};

use crate::{
    mapping::{read_error, write_error},
    models::{self as db_models},
};

/// Implements ScoreRepository on top of the `player_scores` table.
#[derive(Debug, Clone)]
pub struct PostgresScoreRepository {
    pool: PgPool,
}

impl PostgresScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ScoreRepository for PostgresScoreRepository {
    async fn upsert(&self, player: &PlayerScore) -> Result<(), ApplicationError> {
        sqlx::query(
            r#"
              INSERT INTO player_scores (player_id, player_name, score)
              VALUES ($1, $2, $3)
              ON CONFLICT (player_id) DO UPDATE
              SET
                  player_name = EXCLUDED.player_name,
                  score = EXCLUDED.score,
                  updated_at = now()
              "#,
        )
        .bind(&player.player_id)
        .bind(&player.player_name)
        .bind(player.score)
        .execute(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn top_players(&self) -> Result<Vec<PlayerScore>, ApplicationError> {
        let rows = sqlx::query_as::<_, db_models::PlayerScore>(
            r#"
              SELECT player_id, player_name, score
              FROM player_scores
              ORDER BY score DESC, player_id COLLATE "C" DESC
              "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_score(&self, player_id: &str) -> Result<i64, ApplicationError> {
        let score: Option<i64> =
            sqlx::query_scalar(r#"SELECT score FROM player_scores WHERE player_id = $1"#)
                .bind(player_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?;

        score.ok_or_else(|| ApplicationError::PlayerNotFound(player_id.to_string()))
    }
}
