//! Canonical execution request.

use serde::{Deserialize, Serialize};

/// Canonical request handed to the kernel.
///
/// `intent_id` names *what* is requested; the payload type is chosen by the
/// adapter (a JSON body for HTTP, packet metadata for the Sentry adapter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionEnvelope<P> {
    pub intent_id: String,
    pub payload: P,
}

impl<P> ExecutionEnvelope<P> {
    pub fn new(intent_id: impl Into<String>, payload: P) -> Self {
        Self {
            intent_id: intent_id.into(),
            payload,
        }
    }
}
