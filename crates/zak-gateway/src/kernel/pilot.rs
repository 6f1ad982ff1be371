//! Pilot kernel: a compliant stand-in that approves everything.
//!
//! Lets the adapters run end to end without linking the sovereign core. It
//! demonstrates the interface only and makes no policy decisions.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use zak_core::contract::{
    ExecutionEnvelope, KernelClient, KernelDigest, KernelFailure, KernelResult, Outcome,
};

pub const PILOT_NONCE_HASH: &str = "mock-nonce-hash-1234";
pub const PILOT_ROUTE_PLAN_HASH: &str = "mock-route-hash-5678";

#[derive(Debug, Clone)]
pub struct PilotKernel {
    latency: Duration,
}

impl PilotKernel {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for PilotKernel {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

#[async_trait]
impl<P> KernelClient<P> for PilotKernel
where
    P: Serialize + Send + Sync + 'static,
{
    async fn execute(&self, envelope: ExecutionEnvelope<P>) -> Result<KernelResult, KernelFailure> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let received = serde_json::to_value(&envelope.payload)
            .map_err(|e| KernelFailure::new(format!("payload not serializable: {e}")))?;

        Ok(KernelResult::new(Outcome::Success)
            .with_digest(KernelDigest {
                nonce_hash: PILOT_NONCE_HASH.into(),
                route_plan_hash: Some(PILOT_ROUTE_PLAN_HASH.into()),
            })
            .with_output(json!({
                "msg": "Pilot Execution Successful",
                "receivedPayload": received,
            })))
    }
}
