//! These tests need a disposable Postgres database in `TEST_DATABASE_URL`.
//! Run them with `cargo test -p podium_db -- --ignored`.

use podium_app::repository::ScoreRepository;
use podium_db::{PostgresScoreRepository, establish_test_connection_pool};
use podium_types::{PlayerScore, Result, errors::ApplicationError};

async fn setup_repository() -> Result<PostgresScoreRepository> {
    let pool = establish_test_connection_pool().await?;
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    sqlx::query("TRUNCATE player_scores")
        .execute(&pool)
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;

    Ok(PostgresScoreRepository::new(pool))
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_postgres_score_repository() -> Result<()> {
    let repo = setup_repository().await?;

    repo.upsert(&PlayerScore::new("p1", "Alice", 100)).await?;
    repo.upsert(&PlayerScore::new("p2", "Bob", 150)).await?;
    repo.upsert(&PlayerScore::new("p3", "Cara", 90)).await?;
    // Same player again: replaced, not duplicated.
    repo.upsert(&PlayerScore::new("p3", "Cara", 90)).await?;

    assert_eq!(
        repo.top_players().await?,
        vec![
            PlayerScore::new("p2", "Bob", 150),
            PlayerScore::new("p1", "Alice", 100),
            PlayerScore::new("p3", "Cara", 90),
        ]
    );
    assert_eq!(repo.get_score("p3").await?, 90);

    repo.upsert(&PlayerScore::new("p1", "Alicia", 200)).await?;
    assert_eq!(
        repo.top_players().await?.first(),
        Some(&PlayerScore::new("p1", "Alicia", 200))
    );

    assert!(matches!(
        repo.get_score("unknown").await,
        Err(ApplicationError::PlayerNotFound(id)) if id == "unknown"
    ));

    // Equal scores come back by player id, descending, in byte order.
    repo.upsert(&PlayerScore::new("alice", "Alice", 70)).await?;
    repo.upsert(&PlayerScore::new("bob", "Bob", 70)).await?;
    repo.upsert(&PlayerScore::new("Zed", "Zed", 70)).await?;
    let tied: Vec<String> = repo
        .top_players()
        .await?
        .into_iter()
        .filter(|p| p.score == 70)
        .map(|p| p.player_id)
        .collect();
    assert_eq!(tied, vec!["bob", "alice", "Zed"]);

    Ok(())
}
