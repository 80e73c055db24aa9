use async_trait::async_trait;

use podium_types::errors::ApplicationError;

use crate::{
    app::AppContext,
    cqrs::{Query, QueryHandler, queries::GetTopPlayers},
    jobs::tasks::RepopulateLeaderboardTask,
};

/// Cache-aside read of the leaderboard.
///
/// An empty ranked set counts as a miss, so a leaderboard with no players at
/// all scans the score store on every call. A cache error is treated the
/// same way.
pub struct GetTopPlayersHandler {}

impl GetTopPlayersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetTopPlayers> for GetTopPlayersHandler {
    async fn handle(
        &self,
        _query: GetTopPlayers,
        ctx: &AppContext,
    ) -> Result<<GetTopPlayers as Query>::Output, ApplicationError> {
        let rank_key = ctx.config.leaderboard_key.as_str();

        let cached = match ctx.cache.read_ranked(rank_key).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(rank_key, "Error retrieving leaderboard from cache: {e}");
                Vec::new()
            }
        };

        if !cached.is_empty() {
            tracing::info!(count = cached.len(), "Cached leaderboard provided");
            return Ok(cached);
        }

        tracing::info!(rank_key, "Leaderboard cache miss, reading from score store");
        let top_players = ctx.scores.top_players().await.inspect_err(|e| {
            tracing::error!("Error retrieving leaderboard from score store: {e}");
        })?;
        tracing::info!(count = top_players.len(), "Leaderboard retrieved from score store");

        if !top_players.is_empty() {
            ctx.executor.spawn(Box::new(RepopulateLeaderboardTask::new(
                ctx.cache.clone(),
                rank_key,
                top_players.clone(),
            )));
        }

        Ok(top_players)
    }
}
