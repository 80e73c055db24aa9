use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use podium_types::errors::ApplicationError;

/// Helper: a JSON `{"error": message}` body with the given status.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Maps an application error to its HTTP status. `fallback` is the message
/// used for server-side failures.
pub fn error_response(err: &ApplicationError, fallback: &str) -> Response {
    match err {
        ApplicationError::PlayerNotFound(_) => json_error(StatusCode::NOT_FOUND, "Player not found"),
        ApplicationError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "Invalid input"),
        _ => json_error(StatusCode::INTERNAL_SERVER_ERROR, fallback),
    }
}
