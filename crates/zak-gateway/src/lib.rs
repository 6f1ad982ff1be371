//! ZAK gateway library entry.
//!
//! Wires the transport adapters, the axum router, the packet-telemetry
//! listener, and config loading into one boundary layer in front of the
//! kernel. Consumed by the binary (`main.rs`) and by integration tests.

pub mod adapters;
pub mod app_state;
pub mod config;
pub mod kernel;
pub mod ops;
pub mod router;
pub mod transport;
