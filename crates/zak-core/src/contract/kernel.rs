//! Kernel verdict and the client trait used to obtain one.
//!
//! The kernel itself lives outside this workspace. Adapters only see
//! `KernelClient::execute`, so the whole pipeline compiles and tests against
//! any fake that implements that single method.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::envelope::ExecutionEnvelope;

/// Policy outcome. The only field other components branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Denied,
    Interrupted,
    Timeout,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Denied => "denied",
            Outcome::Interrupted => "interrupted",
            Outcome::Timeout => "timeout",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution digest returned by the kernel (opaque hashes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelDigest {
    pub nonce_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_plan_hash: Option<String>,
}

/// Kernel verdict. `digest`, `output`, and `error` are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelResult {
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<KernelDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KernelResult {
    /// Bare result carrying only an outcome.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            digest: None,
            output: None,
            error: None,
        }
    }

    pub fn with_digest(mut self, digest: KernelDigest) -> Self {
        self.digest = Some(digest);
        self
    }

    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// The kernel raised instead of returning a verdict.
///
/// Treated as an internal failure, never as a policy denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct KernelFailure {
    message: String,
}

impl KernelFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Client for the external kernel.
///
/// Implementations must be safe to call concurrently; adapters share one
/// instance across every in-flight request and add no synchronization.
/// A `Timeout` outcome is a normal return value, not an error.
#[async_trait]
pub trait KernelClient<P>: Send + Sync
where
    P: Send + 'static,
{
    async fn execute(&self, envelope: ExecutionEnvelope<P>) -> Result<KernelResult, KernelFailure>;
}
