//! Axum router wiring.
//!
//! - `GET  /zak/health`  : liveness + uptime
//! - `POST /zak/execute` : HTTP adapter pipeline
//!
//! Everything else, wrong methods included, is a bare 404. Bodies over
//! `http.max_body_bytes` get 413 from `DefaultBodyLimit`; the connection is
//! not aborted.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().http.max_body_bytes;

    Router::new()
        .route("/zak/health", get(ops::health).fallback(ops::not_found))
        .route(
            "/zak/execute",
            post(transport::http::execute).fallback(ops::not_found),
        )
        .fallback(ops::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
