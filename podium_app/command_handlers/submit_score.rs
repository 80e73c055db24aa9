use podium_types::{PlayerScore, Result};

use crate::{
    app::AppContext,
    cqrs::{CommandHandler, commands::SubmitScore},
    jobs::tasks::RefreshCacheEntryTask,
};

pub struct SubmitScoreCommandHandler {}

impl Default for SubmitScoreCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitScoreCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SubmitScore> for SubmitScoreCommandHandler {
    /// Persists the score, then hands the cache write-through to the
    /// background executor. The cache is only touched after a durable write.
    async fn handle(&self, command: SubmitScore, ctx: &AppContext) -> Result<()> {
        let player: PlayerScore = command.into();
        let player_id = player.player_id.clone();
        tracing::info!(player_id = %player_id, "Submitting player score");

        if let Err(e) = ctx.scores.upsert(&player).await {
            tracing::error!(player_id = %player_id, "Error updating or inserting player score: {e}");
            return Err(e);
        }
        tracing::info!(player_id = %player_id, score = player.score, "Player score persisted");

        ctx.executor.spawn(Box::new(RefreshCacheEntryTask::new(
            ctx.cache.clone(),
            &ctx.config.leaderboard_key,
            player,
        )));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use podium_types::{PlayerScore, Result, errors::ApplicationError};

    use super::*;
    use crate::{
        repository::{LeaderboardCache, ScoreRepository},
        test_utils::tests::{
            FailingLeaderboardCache, MockLeaderboardCache, MockScoreRepository, TestApp,
        },
    };

    fn submit(player_id: &str, player_name: &str, score: i64) -> SubmitScore {
        SubmitScore {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn test_submit_score_persists_and_schedules_cache_update() -> Result<()> {
        let app = TestApp::new();
        let handler = SubmitScoreCommandHandler::new();

        handler.handle(submit("p1", "Alice", 100), &app.ctx).await?;

        assert_eq!(app.scores.get_score("p1").await?, 100);
        // The caller got its answer before the cache was written.
        assert_eq!(app.executor.pending(), 1);
        assert!(app.cache.read_ranked("leaderboard").await?.is_empty());

        app.executor.run_pending().await;

        let cached = app.cache.read_ranked("leaderboard").await?;
        assert_eq!(cached, vec![PlayerScore::new("p1", "Alice", 100)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_score_is_idempotent() -> Result<()> {
        let app = TestApp::new();
        let handler = SubmitScoreCommandHandler::new();

        handler.handle(submit("p1", "Alice", 100), &app.ctx).await?;
        handler.handle(submit("p1", "Alice", 100), &app.ctx).await?;
        app.executor.run_pending().await;

        assert_eq!(
            app.scores.top_players().await?,
            vec![PlayerScore::new("p1", "Alice", 100)]
        );
        assert_eq!(app.cache.read_ranked("leaderboard").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_score_last_write_wins() -> Result<()> {
        let app = TestApp::new();
        let handler = SubmitScoreCommandHandler::new();

        handler.handle(submit("p1", "A", 10), &app.ctx).await?;
        handler.handle(submit("p1", "B", 20), &app.ctx).await?;
        app.executor.run_pending().await;

        let expected = PlayerScore::new("p1", "B", 20);
        assert_eq!(app.scores.top_players().await?, vec![expected.clone()]);
        assert_eq!(app.cache.read_ranked("leaderboard").await?, vec![expected.clone()]);
        assert_eq!(app.cache.read_one("p1").await?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_score_store_failure_skips_cache() {
        let app = TestApp::new();
        app.scores.set_available(false);
        let handler = SubmitScoreCommandHandler::new();

        let result = handler.handle(submit("p1", "Alice", 100), &app.ctx).await;

        assert!(matches!(result, Err(ApplicationError::Store(_))));
        assert_eq!(app.executor.pending(), 0, "cache must not be scheduled");
    }

    #[tokio::test]
    async fn test_submit_score_succeeds_with_unreachable_cache() -> Result<()> {
        let scores = Arc::new(MockScoreRepository::default());
        let cache = Arc::new(FailingLeaderboardCache::default());
        let app = TestApp::with(scores.clone(), cache.clone());
        let handler = SubmitScoreCommandHandler::new();

        handler.handle(submit("p1", "Alice", 100), &app.ctx).await?;
        app.executor.run_pending().await;

        assert_eq!(scores.get_score("p1").await?, 100);
        assert_eq!(cache.write_attempts(), vec!["p1"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_score_uses_configured_rank_key() -> Result<()> {
        let cache = Arc::new(MockLeaderboardCache::default());
        let app = TestApp::with(Arc::new(MockScoreRepository::default()), cache.clone())
            .with_leaderboard_key("season-2");
        let handler = SubmitScoreCommandHandler::new();

        handler.handle(submit("p1", "Alice", 100), &app.ctx).await?;
        app.executor.run_pending().await;

        assert_eq!(cache.read_ranked("season-2").await?.len(), 1);
        assert!(cache.read_ranked("leaderboard").await?.is_empty());
        Ok(())
    }
}
