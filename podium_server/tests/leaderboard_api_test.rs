
use reqwest::StatusCode;
use serde_json::{Value, json};

use podium_app::repository::LeaderboardCache;
use podium_types::{PlayerScore, Result};

use crate::test_utils::tests::{
    TestServer, setup_detached_web_app, setup_web_app, setup_web_app_without_cache,
    wait_for_cache,
};

async fn submit(server: &TestServer, player_id: &str, player_name: &str, score: i64) -> StatusCode {
    server
        .client
        .post(server.url("/points/add_or_update"))
        .json(&json!({
            "player_id": player_id,
            "player_name": player_name,
            "score": score,
        }))
        .send()
        .await
        .unwrap()
        .status()
}

async fn top_players(server: &TestServer) -> (StatusCode, Value) {
    let res = server
        .client
        .get(server.url("/points/top_players"))
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get_points(server: &TestServer, player_id: &str) -> (StatusCode, Value) {
    let res = server
        .client
        .get(server.url(&format!("/points/get_points/{player_id}")))
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_leaderboard_scenario() -> Result<()> {
    let (server, cache, executor) = setup_web_app().await?;

    assert_eq!(submit(&server, "p1", "Alice", 100).await, StatusCode::OK);
    assert_eq!(submit(&server, "p2", "Bob", 150).await, StatusCode::OK);
    assert_eq!(submit(&server, "p3", "Cara", 90).await, StatusCode::OK);
    assert_eq!(executor.run_pending().await, 3);

    let (status, body) = top_players(&server).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "top_players": [
            { "player_id": "p2", "player_name": "Bob", "score": 150 },
            { "player_id": "p1", "player_name": "Alice", "score": 100 },
            { "player_id": "p3", "player_name": "Cara", "score": 90 },
        ]})
    );
    assert_eq!(server.scores.scan_count(), 0, "served from the cache");
    assert_eq!(cache.ranked_len("leaderboard").await, 3);

    let (status, body) = get_points(&server, "p3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "player_id": "p3", "score": 90 }));

    let (status, body) = get_points(&server, "unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Player not found" }));

    Ok(())
}

#[tokio::test]
async fn test_cold_cache_is_repopulated_from_store() -> Result<()> {
    let (server, cache, executor) = setup_web_app().await?;
    server.scores.seed(PlayerScore::new("p1", "Alice", 50));
    server.scores.seed(PlayerScore::new("p2", "Bob", 80));
    let expected = json!({ "top_players": [
        { "player_id": "p2", "player_name": "Bob", "score": 80 },
        { "player_id": "p1", "player_name": "Alice", "score": 50 },
    ]});

    let (status, body) = top_players(&server).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
    assert_eq!(server.scores.scan_count(), 1);

    executor.run_pending().await;
    assert_eq!(cache.read_one("p2").await?, PlayerScore::new("p2", "Bob", 80));

    let (_, body) = top_players(&server).await;
    assert_eq!(body, expected);
    assert_eq!(server.scores.scan_count(), 1, "second read must hit the cache");

    Ok(())
}

#[tokio::test]
async fn test_last_write_wins_through_detached_tasks() -> Result<()> {
    let (server, cache) = setup_detached_web_app().await?;

    assert_eq!(submit(&server, "p1", "A", 10).await, StatusCode::OK);
    assert!(wait_for_cache(&cache, 1).await);
    assert_eq!(submit(&server, "p1", "B", 20).await, StatusCode::OK);

    let mut cached = cache.read_one("p1").await?;
    for _ in 0..100 {
        if cached.score == 20 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        cached = cache.read_one("p1").await?;
    }
    assert_eq!(cached, PlayerScore::new("p1", "B", 20));
    assert_eq!(cache.ranked_len("leaderboard").await, 1);

    let (_, body) = get_points(&server, "p1").await;
    assert_eq!(body, json!({ "player_id": "p1", "score": 20 }));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_cache_does_not_fail_requests() -> Result<()> {
    let (server, executor) = setup_web_app_without_cache().await?;

    assert_eq!(submit(&server, "p1", "Alice", 100).await, StatusCode::OK);
    assert_eq!(submit(&server, "p2", "Bob", 150).await, StatusCode::OK);
    executor.run_pending().await;

    let (status, body) = top_players(&server).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["top_players"][0]["player_id"], "p2");
    assert_eq!(body["top_players"][1]["player_id"], "p1");
    executor.run_pending().await;

    Ok(())
}

#[tokio::test]
async fn test_store_outage_is_reported() -> Result<()> {
    let (server, _cache, executor) = setup_web_app().await?;
    server.scores.set_available(false);

    let res = server
        .client
        .post(server.url("/points/add_or_update"))
        .json(&json!({ "player_id": "p1", "player_name": "Alice", "score": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "error": "Failed to update player score" })
    );
    assert_eq!(executor.pending(), 0);

    let (status, body) = top_players(&server).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to retrieve top players" }));

    Ok(())
}

#[tokio::test]
async fn test_malformed_submission_is_rejected() -> Result<()> {
    let (server, _cache, executor) = setup_web_app().await?;

    let res = server
        .client
        .post(server.url("/points/add_or_update"))
        .json(&json!({ "player_id": "p1", "player_name": "Alice", "score": "lots" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "error": "Invalid input" })
    );

    assert_eq!(submit(&server, "", "Nobody", 1).await, StatusCode::BAD_REQUEST);
    assert_eq!(executor.pending(), 0);

    let (status, _) = get_points(&server, "p1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
