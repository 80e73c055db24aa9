use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use podium_app::{
    command_handlers::SubmitScoreCommandHandler,
    cqrs::{
        commands::SubmitScore,
        queries::{GetPlayerScore, GetTopPlayers},
    },
    queries_handlers::{GetPlayerScoreHandler, GetTopPlayersHandler},
};
use podium_types::errors::ApplicationError;

use crate::{
    handlers::{error_response, json_error},
    http::AppState,
};

// Body for a score submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreForm {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
}

impl TryFrom<ScoreForm> for SubmitScore {
    type Error = ApplicationError;

    fn try_from(form: ScoreForm) -> Result<Self, Self::Error> {
        if form.player_id.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "player_id must not be empty".to_string(),
            ));
        }

        Ok(SubmitScore {
            player_id: form.player_id,
            player_name: form.player_name,
            score: form.score,
        })
    }
}

/// POST /points/add_or_update – Store a player's score.
pub async fn add_or_update(
    State(state): State<AppState>,
    payload: Result<Json<ScoreForm>, JsonRejection>,
) -> Response {
    let command = match payload
        .map_err(|rejection| ApplicationError::Validation(rejection.body_text()))
        .and_then(|Json(form)| SubmitScore::try_from(form))
    {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Rejected score submission: {e}");
            return json_error(StatusCode::BAD_REQUEST, "Invalid input");
        }
    };

    match state
        .app_bus
        .execute(command, SubmitScoreCommandHandler::new())
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Player score added or updated" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Unable to update player score: {e}");
            error_response(&e, "Failed to update player score")
        }
    }
}

/// GET /points/top_players – The whole leaderboard, highest score first.
pub async fn top_players(State(state): State<AppState>) -> Response {
    match state
        .app_bus
        .query(GetTopPlayers, GetTopPlayersHandler::new())
        .await
    {
        Ok(players) => (StatusCode::OK, Json(json!({ "top_players": players }))).into_response(),
        Err(e) => {
            tracing::error!("Unable to load leaderboard: {e}");
            error_response(&e, "Failed to retrieve top players")
        }
    }
}

/// GET /points/get_points/{id} – Score of a single player.
pub async fn get_points(State(state): State<AppState>, Path(player_id): Path<String>) -> Response {
    let query = GetPlayerScore { player_id };

    match state.app_bus.query(query, GetPlayerScoreHandler::new()).await {
        Ok(view) => (
            StatusCode::OK,
            Json(json!({ "player_id": view.player_id, "score": view.score })),
        )
            .into_response(),
        Err(e) => error_response(&e, "Failed to retrieve player score"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(player_id: &str) -> ScoreForm {
        ScoreForm {
            player_id: player_id.to_string(),
            player_name: "Alice".to_string(),
            score: 100,
        }
    }

    #[test]
    fn test_score_form_into_command() {
        let cmd = SubmitScore::try_from(form("p1")).unwrap();

        assert_eq!(cmd.player_id, "p1");
        assert_eq!(cmd.player_name, "Alice");
        assert_eq!(cmd.score, 100);
    }

    #[test]
    fn test_score_form_rejects_blank_player_id() {
        assert!(matches!(
            SubmitScore::try_from(form("  ")),
            Err(ApplicationError::Validation(_))
        ));
    }
}
