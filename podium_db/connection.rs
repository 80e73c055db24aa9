use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;

use podium_types::errors::{ApplicationError, StoreError};

pub type DbPool = PgPool;

pub async fn establish_connection_pool(max_connections: u32) -> Result<DbPool, ApplicationError> {
    init_connection_pool("DATABASE_URL", max_connections).await
}

pub async fn establish_test_connection_pool() -> Result<DbPool, ApplicationError> {
    init_connection_pool("TEST_DATABASE_URL", 5).await
}

async fn init_connection_pool(
    database_env: &'static str,
    max_connections: u32,
) -> Result<DbPool, ApplicationError> {
    dotenvy::dotenv().ok();

    let database_url = env::var(database_env)
        .map_err(|_| StoreError::Unavailable(format!("{database_env} must be set")))?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .map_err(StoreError::Database)?;

    tracing::info!("Connected to score store ({database_env})");
    Ok(pool)
}
