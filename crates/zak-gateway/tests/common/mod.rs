//! Kernel fakes and fixtures shared by gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use zak_core::audit::MemorySink;
use zak_core::contract::{
    ExecutionEnvelope, KernelClient, KernelDigest, KernelFailure, KernelResult, Outcome,
};
use zak_gateway::adapters::{HttpAdapter, SentryAdapter};

pub const CORR: &str = "test-c72b-442a";

/// Returns the same verdict for every envelope and records what it saw.
pub struct FixedKernel<P> {
    result: KernelResult,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<ExecutionEnvelope<P>>>,
}

impl<P> FixedKernel<P> {
    pub fn new(outcome: Outcome) -> Self {
        Self::with_result(KernelResult::new(outcome))
    }

    pub fn with_result(result: KernelResult) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: Clone> FixedKernel<P> {
    pub fn seen(&self) -> Vec<ExecutionEnvelope<P>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl<P> KernelClient<P> for FixedKernel<P>
where
    P: Send + Sync + 'static,
{
    async fn execute(&self, envelope: ExecutionEnvelope<P>) -> Result<KernelResult, KernelFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.seen.lock().unwrap().push(envelope);
        Ok(self.result.clone())
    }
}

/// Raises instead of returning a verdict.
pub struct FailingKernel {
    message: String,
}

impl FailingKernel {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl<P> KernelClient<P> for FailingKernel
where
    P: Send + 'static,
{
    async fn execute(&self, _envelope: ExecutionEnvelope<P>) -> Result<KernelResult, KernelFailure> {
        Err(KernelFailure::new(self.message.clone()))
    }
}

pub fn success_with_digest() -> KernelResult {
    KernelResult::new(Outcome::Success).with_digest(KernelDigest {
        nonce_hash: "nonce-abc".into(),
        route_plan_hash: None,
    })
}

pub fn http_adapter(kernel: Arc<dyn KernelClient<Value>>) -> (HttpAdapter, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (HttpAdapter::new("http-test", kernel, sink.clone()), sink)
}

pub fn sentry_adapter(
    kernel: Arc<dyn KernelClient<zak_core::contract::SignalingPacketMetadata>>,
) -> (SentryAdapter, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (SentryAdapter::new("sentry-test", kernel, sink.clone()), sink)
}
