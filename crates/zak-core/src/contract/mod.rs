//! Contracts shared by every adapter and the kernel.
//!
//! Adapters and the kernel agree on these shapes and nothing else:
//! - `envelope`: what is being requested (`intentId` + payload).
//! - `kernel`: the verdict coming back, and the client trait used to ask.
//! - `telemetry`: the packet metadata carried by the Sentry adapter.

pub mod envelope;
pub mod kernel;
pub mod telemetry;

pub use envelope::ExecutionEnvelope;
pub use kernel::{KernelClient, KernelDigest, KernelFailure, KernelResult, Outcome};
pub use telemetry::{SignalingPacketMetadata, SignalingType, TransportProtocol};
