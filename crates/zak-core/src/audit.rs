//! Audit trail contract.
//!
//! One `AuditEvent` is written per pipeline stage transition:
//! `INGESTED`, then `EXECUTED`, then `EMITTED`, with `REJECTED` terminating
//! the pipeline from either of the first two stages. Events are append-only.
//!
//! The emitter never fails. Sinks swallow their own write errors (reporting
//! them through `tracing`) so a broken audit stream cannot abort a request.

use std::io::{Stdout, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::contract::{Outcome, TransportProtocol};
use crate::error::ZakError;

/// Pipeline stage recorded by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditStage {
    Ingested,
    Executed,
    Emitted,
    Rejected,
}

impl AuditStage {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditStage::Ingested => "INGESTED",
            AuditStage::Executed => "EXECUTED",
            AuditStage::Emitted => "EMITTED",
            AuditStage::Rejected => "REJECTED",
        }
    }
}

/// One structured audit record (serialized as a single JSON line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    pub adapter_id: String,
    pub correlation_id: String,
    pub event: AuditStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl AuditEvent {
    /// Convenience accessor for a metadata string field.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

/// Caller-supplied fields merged into an event.
#[derive(Debug, Clone, Default)]
pub struct AuditExtras {
    duration_ms: Option<u64>,
    error_code: Option<&'static str>,
    outcome: Option<Outcome>,
    protocol: Option<TransportProtocol>,
    error: Option<String>,
    action: Option<&'static str>,
}

impl AuditExtras {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn duration(mut self, elapsed: Duration) -> Self {
        self.duration_ms = Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn protocol(mut self, protocol: TransportProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    /// Record a failure: stable code plus human-readable message.
    pub fn failure(mut self, err: &ZakError) -> Self {
        self.error_code = Some(err.code());
        self.error = Some(err.to_string());
        self
    }

    fn into_metadata(self) -> Option<Map<String, Value>> {
        let mut m = Map::new();
        if let Some(o) = self.outcome {
            m.insert("outcome".into(), Value::from(o.as_str()));
        }
        if let Some(p) = self.protocol {
            m.insert("protocol".into(), Value::from(p.as_str()));
        }
        if let Some(a) = self.action {
            m.insert("action".into(), Value::from(a));
        }
        if let Some(e) = self.error {
            m.insert("error".into(), Value::from(e));
        }
        if m.is_empty() {
            None
        } else {
            Some(m)
        }
    }
}

/// Destination for audit events. Must tolerate concurrent appends.
pub trait AuditSink: Send + Sync {
    fn write(&self, event: &AuditEvent);
}

/// JSON-lines sink over any writer: one serialized event per line.
///
/// The writer sits behind a mutex and each record is written and flushed in
/// one critical section, so concurrent emitters interleave by whole lines.
#[derive(Debug)]
pub struct JsonLineSink<W> {
    out: Mutex<W>,
}

/// Process-wide audit stream.
pub type StdoutSink = JsonLineSink<Stdout>;

impl JsonLineSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give back the writer (test buffers, mostly).
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> AuditSink for JsonLineSink<W> {
    fn write(&self, event: &AuditEvent) {
        let mut line = match serde_json::to_vec(event) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "audit event serialization failed");
                return;
            }
        };
        line.push(b'\n');

        let res = {
            let mut out = match self.out.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            out.write_all(&line).and_then(|_| out.flush())
        };
        if let Err(e) = res {
            tracing::warn!(error = %e, "audit write failed");
        }
    }
}

/// In-memory sink used to capture the trail in tests and tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far, in append order.
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events for one correlation id, in append order.
    pub fn for_correlation(&self, correlation_id: &str) -> Vec<AuditEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.correlation_id == correlation_id)
            .collect()
    }

    /// Stage sequence for one correlation id.
    pub fn stages(&self, correlation_id: &str) -> Vec<AuditStage> {
        self.for_correlation(correlation_id)
            .into_iter()
            .map(|e| e.event)
            .collect()
    }
}

impl AuditSink for MemorySink {
    fn write(&self, event: &AuditEvent) {
        // A poisoned lock still holds a usable Vec; keep appending.
        let mut g = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        g.push(event.clone());
    }
}

/// Per-adapter event builder bound to one sink.
#[derive(Clone)]
pub struct AuditEmitter {
    adapter_id: String,
    sink: Arc<dyn AuditSink>,
}

impl AuditEmitter {
    pub fn new(adapter_id: impl Into<String>, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            sink,
        }
    }

    pub fn adapter_id(&self) -> &str {
        &self.adapter_id
    }

    /// Build and write one event. Never fails.
    pub fn emit(&self, stage: AuditStage, correlation_id: &str, extras: AuditExtras) {
        let event = AuditEvent {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            adapter_id: self.adapter_id.clone(),
            correlation_id: correlation_id.to_string(),
            event: stage,
            duration_ms: extras.duration_ms,
            error_code: extras.error_code.map(str::to_string),
            metadata: extras.into_metadata(),
        };
        self.sink.write(&event);
    }
}
