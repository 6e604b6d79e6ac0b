use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: String,
}

/// Single-secret access gate. The server keeps no session state; the client
/// caches the result for the lifetime of the tab.
pub async fn verify_password(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPasswordRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Invalid request" })),
        )
            .into_response();
    };

    // An unset secret must never authorize anyone.
    if state.access_password.is_empty() {
        error!("ACCESS_PASSWORD is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "Server configuration error" })),
        )
            .into_response();
    }

    if request.password == state.access_password {
        info!("password verification succeeded");
        (StatusCode::OK, Json(json!({ "success": true }))).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "success": false }))).into_response()
    }
}
