pub mod error;
pub mod generate;
pub mod password;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate::generate))
        .route("/api/verify-password", post(password::verify_password))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
