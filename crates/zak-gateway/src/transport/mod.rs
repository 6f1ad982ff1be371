//! Transport layer.
//!
//! - `http`: the `/zak/execute` handler (body decode + error mapping).
//! - `udp`: the packet-telemetry listener feeding the Sentry adapter.

pub mod http;
pub mod udp;
