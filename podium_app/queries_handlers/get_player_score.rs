use async_trait::async_trait;

use podium_types::errors::ApplicationError;

use crate::{
    app::AppContext,
    cqrs::{
        Query, QueryHandler,
        queries::{GetPlayerScore, PlayerScoreView},
    },
};

/// Single-player lookups always read the score store; the cached detail
/// record is not consulted.
pub struct GetPlayerScoreHandler {}

impl GetPlayerScoreHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPlayerScore> for GetPlayerScoreHandler {
    async fn handle(
        &self,
        query: GetPlayerScore,
        ctx: &AppContext,
    ) -> Result<<GetPlayerScore as Query>::Output, ApplicationError> {
        let player_id = query.player_id;
        tracing::info!(player_id = %player_id, "Fetching player score");

        match ctx.scores.get_score(&player_id).await {
            Ok(score) => {
                tracing::info!(player_id = %player_id, score, "Player score retrieved successfully");
                Ok(PlayerScoreView { player_id, score })
            }
            Err(e) => {
                tracing::warn!(player_id = %player_id, "Error fetching player score: {e}");
                Err(e)
            }
        }
    }
}
