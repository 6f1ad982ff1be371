//! HTTP adapter: JSON request -> envelope -> kernel -> HTTP response.
//!
//! Stages:
//! - `ingest`: resolve correlation id, decode the body into a typed request
//!   (object check, `intentId`, strict `amount`).
//! - `execute`: forward the envelope to the kernel and time it.
//! - `emit`: map the outcome to a status code and response headers.
//!
//! Every stage writes exactly one audit event.

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use uuid::Uuid;

use zak_core::audit::{AuditEmitter, AuditExtras, AuditSink, AuditStage};
use zak_core::contract::{ExecutionEnvelope, KernelClient, KernelResult, Outcome};
use zak_core::error::{Result, ZakError};
use zak_core::money::{parse_amount, MonetaryValue};

pub const CORRELATION_HEADER: &str = "x-correlation-id";
pub const ADAPTER_HEADER: &str = "x-zak-adapter";

/// Body field carrying the intent id.
const INTENT_FIELD: &str = "intentId";
/// Body field routed through the monetary parser.
const AMOUNT_FIELD: &str = "amount";

/// Typed request produced by `ingest`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpIngest {
    pub intent_id: String,
    /// The request body, unchanged.
    pub payload: Value,
    pub correlation_id: String,
    /// Parsed `amount`, when the body carried one.
    pub amount: Option<MonetaryValue>,
}

/// Transport-ready response produced by `emit`.
#[derive(Debug, Clone)]
pub struct HttpOutput {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: KernelResult,
}

impl IntoResponse for HttpOutput {
    fn into_response(self) -> Response {
        (self.status, self.headers, Json(self.body)).into_response()
    }
}

/// Outcome -> HTTP status. `interrupted` (and anything unforeseen) is a 500.
pub fn status_for(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::Success => StatusCode::OK,
        Outcome::Denied => StatusCode::FORBIDDEN,
        Outcome::Timeout => StatusCode::REQUEST_TIMEOUT,
        Outcome::Interrupted => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub struct HttpAdapter {
    kernel: Arc<dyn KernelClient<Value>>,
    audit: AuditEmitter,
}

impl HttpAdapter {
    pub fn new(
        adapter_id: impl Into<String>,
        kernel: Arc<dyn KernelClient<Value>>,
        sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            kernel,
            audit: AuditEmitter::new(adapter_id, sink),
        }
    }

    pub fn adapter_id(&self) -> &str {
        self.audit.adapter_id()
    }

    /// Validate headers and body into an `HttpIngest`.
    ///
    /// `body` is `None` when the request carried no body at all.
    pub fn ingest(&self, headers: &HeaderMap, body: Option<Value>) -> Result<HttpIngest> {
        let correlation_id = resolve_correlation_id(headers);
        self.audit
            .emit(AuditStage::Ingested, &correlation_id, AuditExtras::none());

        match decode_body(body) {
            Ok((intent_id, amount, payload)) => Ok(HttpIngest {
                intent_id,
                payload,
                correlation_id,
                amount,
            }),
            Err(e) => {
                tracing::debug!(correlation_id = %correlation_id, code = e.code(), "ingest rejected");
                self.audit.emit(
                    AuditStage::Rejected,
                    &correlation_id,
                    AuditExtras::none().failure(&e),
                );
                Err(e)
            }
        }
    }

    /// Forward to the kernel. A kernel failure is audited and returned unchanged.
    pub async fn execute(&self, input: &HttpIngest) -> Result<KernelResult> {
        let started = Instant::now();
        let envelope = ExecutionEnvelope::new(input.intent_id.clone(), input.payload.clone());

        match self.kernel.execute(envelope).await {
            Ok(result) => {
                self.audit.emit(
                    AuditStage::Executed,
                    &input.correlation_id,
                    AuditExtras::none()
                        .duration(started.elapsed())
                        .outcome(result.outcome),
                );
                Ok(result)
            }
            Err(failure) => {
                let err = ZakError::Kernel(failure);
                tracing::warn!(correlation_id = %input.correlation_id, error = %err, "kernel call failed");
                self.audit.emit(
                    AuditStage::Rejected,
                    &input.correlation_id,
                    AuditExtras::none().duration(started.elapsed()).failure(&err),
                );
                Err(err)
            }
        }
    }

    /// Build the HTTP response for a kernel verdict.
    pub fn emit(&self, correlation_id: &str, result: KernelResult) -> HttpOutput {
        self.audit.emit(
            AuditStage::Emitted,
            correlation_id,
            AuditExtras::none().outcome(result.outcome),
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        match HeaderValue::from_str(correlation_id) {
            Ok(v) => {
                headers.insert(CORRELATION_HEADER, v);
            }
            Err(_) => {
                tracing::warn!(correlation_id = %correlation_id, "correlation id not representable as header");
            }
        }
        if let Ok(v) = HeaderValue::from_str(self.adapter_id()) {
            headers.insert(ADAPTER_HEADER, v);
        }

        HttpOutput {
            status: status_for(result.outcome),
            headers,
            body: result,
        }
    }
}

/// First non-empty `x-correlation-id` value, else a fresh UUID v4.
fn resolve_correlation_id(headers: &HeaderMap) -> String {
    headers
        .get_all(CORRELATION_HEADER)
        .iter()
        .next()
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Decode the untrusted body into (intent id, amount, original body).
///
/// Order: object check, then `intentId`, then `amount`. A missing intent id
/// is reported even when other fields are also invalid.
fn decode_body(body: Option<Value>) -> Result<(String, Option<MonetaryValue>, Value)> {
    let Some(Value::Object(obj)) = body else {
        return Err(ZakError::InvalidPayload);
    };

    let intent_id = intent_id(&obj)?;
    let amount = match obj.get(AMOUNT_FIELD) {
        Some(raw) => Some(parse_amount(raw)?),
        None => None,
    };

    Ok((intent_id, amount, Value::Object(obj)))
}

fn intent_id(obj: &Map<String, Value>) -> Result<String> {
    match obj.get(INTENT_FIELD) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ZakError::MissingField(INTENT_FIELD)),
    }
}
