//! Operational HTTP endpoints.
//!
//! - `/zak/health` : liveness with process uptime in seconds

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app_state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "uptime": state.uptime().as_secs_f64(),
        })),
    )
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
