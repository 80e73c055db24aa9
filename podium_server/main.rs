use std::sync::Arc;

use podium_app::{
    app::AppBus, config::Config, jobs::TokioTaskExecutor, repository::LeaderboardCache,
};
use podium_cache::{InMemoryLeaderboardCache, RedisLeaderboardCache};
use podium_db::{PostgresScoreRepository, establish_connection_pool};
use podium_types::{Result, errors::ApplicationError};
use podium_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let (config, app_bus) = setup_app().await?;
    let state = AppState::new(app_bus);

    WebRouter::serve(state, config.http_port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    tracing::info!(
        http_port = config.http_port,
        leaderboard_key = %config.leaderboard_key,
        "Application starting"
    );

    let db_pool = establish_connection_pool(config.db_max_connections).await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;

    let scores = Arc::new(PostgresScoreRepository::new(db_pool));
    let cache = setup_cache(&config).await?;
    let executor = Arc::new(TokioTaskExecutor::new());
    let app_bus = Arc::new(AppBus::new(config.clone(), scores, cache, executor));

    Ok((config, app_bus))
}

async fn setup_cache(config: &Config) -> Result<Arc<dyn LeaderboardCache>, ApplicationError> {
    match &config.redis {
        Some(redis) => {
            tracing::info!(
                addr = %redis.addr,
                db_index = redis.db_index,
                "Using Redis leaderboard cache"
            );
            Ok(Arc::new(RedisLeaderboardCache::connect(&redis.url()).await?))
        }
        None => {
            tracing::warn!("REDIS_ADDR not set, leaderboard cache kept in process");
            Ok(Arc::new(InMemoryLeaderboardCache::new()))
        }
    }
}
