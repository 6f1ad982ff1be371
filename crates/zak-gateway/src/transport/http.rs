//! `/zak/execute` handler.
//!
//! Decode the raw body once, then run Ingest -> Execute -> Emit.
//!
//! Body size is capped upstream by `DefaultBodyLimit`. An oversized body is
//! answered with 413 Payload Too Large rather than by aborting the
//! connection, and never reaches this handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use zak_core::error::{ClientCode, Result, ZakError};

use crate::app_state::AppState;

pub async fn execute(State(app): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let adapter = app.http();

    let body = match decode_body(&body) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };

    let input = match adapter.ingest(&headers, body) {
        Ok(i) => i,
        Err(e) => return error_response(&e),
    };

    let result = match adapter.execute(&input).await {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    adapter.emit(&input.correlation_id, result).into_response()
}

/// Empty body -> `None` (ingest reports it); anything else must be JSON.
pub fn decode_body(raw: &[u8]) -> Result<Option<Value>> {
    if raw.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| ZakError::MalformedBody(e.to_string()))
}

/// "Invalid ..." failures -> 400, everything else (missing fields, kernel and
/// internal failures) -> 500.
pub fn error_response(err: &ZakError) -> Response {
    let status = match err.client_code() {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
