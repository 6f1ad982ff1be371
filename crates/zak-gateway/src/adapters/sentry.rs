//! Ingress Sentry adapter: packet telemetry -> envelope -> kernel -> filter action.
//!
//! The Sentry asks the kernel exactly one question per packet: should this
//! signaling packet be let through? Every packet therefore carries the same
//! intent (`mitigate-storm`). Verdicts map onto the three-way vocabulary of
//! a packet-filter hook; anything that is not a clear pass or drop aborts,
//! which callers must treat as fail closed.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use zak_core::audit::{AuditEmitter, AuditExtras, AuditSink, AuditStage};
use zak_core::contract::{
    ExecutionEnvelope, KernelClient, KernelResult, Outcome, SignalingPacketMetadata,
};
use zak_core::error::{Result, ZakError};

/// Intent evaluated for every packet.
pub const MITIGATE_STORM_INTENT: &str = "mitigate-storm";

/// Correlation placeholder for callers that do not track packets individually.
pub const UNTRACKED_CORRELATION: &str = "N/A";

/// Filter action handed to the packet hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentryAction {
    Pass,
    Drop,
    Aborted,
}

impl SentryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SentryAction::Pass => "PASS",
            SentryAction::Drop => "DROP",
            SentryAction::Aborted => "ABORTED",
        }
    }

    /// Numeric XDP action code (`XDP_ABORTED`, `XDP_DROP`, `XDP_PASS`).
    pub fn xdp_code(self) -> u32 {
        match self {
            SentryAction::Aborted => 0,
            SentryAction::Drop => 1,
            SentryAction::Pass => 2,
        }
    }

    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => SentryAction::Pass,
            Outcome::Denied => SentryAction::Drop,
            Outcome::Interrupted | Outcome::Timeout => SentryAction::Aborted,
        }
    }
}

impl fmt::Display for SentryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct SentryAdapter {
    kernel: Arc<dyn KernelClient<SignalingPacketMetadata>>,
    audit: AuditEmitter,
}

impl SentryAdapter {
    pub fn new(
        adapter_id: impl Into<String>,
        kernel: Arc<dyn KernelClient<SignalingPacketMetadata>>,
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

    /// Wrap packet metadata into the storm-mitigation envelope.
    pub fn ingest(
        &self,
        metadata: SignalingPacketMetadata,
        correlation_id: &str,
    ) -> ExecutionEnvelope<SignalingPacketMetadata> {
        self.audit.emit(
            AuditStage::Ingested,
            correlation_id,
            AuditExtras::none().protocol(metadata.protocol),
        );
        ExecutionEnvelope::new(MITIGATE_STORM_INTENT, metadata)
    }

    /// Evaluate the packet against kernel policy.
    pub async fn execute(
        &self,
        envelope: ExecutionEnvelope<SignalingPacketMetadata>,
        correlation_id: &str,
    ) -> Result<KernelResult> {
        let started = Instant::now();
        let protocol = envelope.payload.protocol;

        match self.kernel.execute(envelope).await {
            Ok(result) => {
                self.audit.emit(
                    AuditStage::Executed,
                    correlation_id,
                    AuditExtras::none()
                        .duration(started.elapsed())
                        .outcome(result.outcome),
                );
                Ok(result)
            }
            Err(failure) => {
                let err = ZakError::Kernel(failure);
                self.audit.emit(
                    AuditStage::Rejected,
                    correlation_id,
                    AuditExtras::none()
                        .duration(started.elapsed())
                        .protocol(protocol)
                        .failure(&err),
                );
                Err(err)
            }
        }
    }

    /// Translate a verdict into a filter action.
    pub fn emit(&self, correlation_id: &str, result: &KernelResult) -> SentryAction {
        let action = SentryAction::from_outcome(result.outcome);
        self.audit.emit(
            AuditStage::Emitted,
            correlation_id,
            AuditExtras::none()
                .outcome(result.outcome)
                .action(action.as_str()),
        );
        action
    }

    /// Full pipeline for one packet. Kernel failures fail closed (`ABORTED`).
    pub async fn evaluate(
        &self,
        metadata: SignalingPacketMetadata,
        correlation_id: &str,
    ) -> SentryAction {
        let envelope = self.ingest(metadata, correlation_id);
        match self.execute(envelope, correlation_id).await {
            Ok(result) => self.emit(correlation_id, &result),
            Err(_) => SentryAction::Aborted,
        }
    }
}
