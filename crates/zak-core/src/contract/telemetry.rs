//! Signaling packet metadata (Sentry adapter payload).
//!
//! Captures the telemetry needed to spot signaling storms: bursts of
//! control-plane packets such as SCTP INIT floods.

use serde::{Deserialize, Serialize};

/// Transport protocol observed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportProtocol {
    Sctp,
    Udp,
    Tcp,
}

impl TransportProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportProtocol::Sctp => "SCTP",
            TransportProtocol::Udp => "UDP",
            TransportProtocol::Tcp => "TCP",
        }
    }
}

/// Control-plane message class, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalingType {
    Init,
    Heartbeat,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalingPacketMetadata {
    pub src_addr: String,
    pub dst_addr: String,
    pub protocol: TransportProtocol,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signaling_type: Option<SignalingType>,
    pub packet_hash: String,
}
