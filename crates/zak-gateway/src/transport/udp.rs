//! Packet-telemetry listener (UDP).
//!
//! Each datagram becomes one `SignalingPacketMetadata` and runs through the
//! Sentry pipeline on its own task. The resulting action is only logged:
//! enforcing it belongs to the packet-filter hook, which lives outside this
//! process.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::net::UdpSocket;

use zak_core::contract::{SignalingPacketMetadata, SignalingType, TransportProtocol};
use zak_core::error::{Result, ZakError};
use zak_core::pulse;

use crate::adapters::{SentryAction, SentryAdapter};

/// Largest UDP payload we will read.
const MAX_DATAGRAM: usize = 65_535;

/// Hex chars of the packet hash kept in correlation ids.
const CORRELATION_HASH_CHARS: usize = 16;

/// Build telemetry for one datagram.
pub fn packet_metadata(packet: &[u8], src: SocketAddr, dst: SocketAddr) -> SignalingPacketMetadata {
    let signaling_type = if pulse::is_pulse(packet) {
        SignalingType::Heartbeat
    } else {
        SignalingType::Data
    };

    SignalingPacketMetadata {
        src_addr: src.to_string(),
        dst_addr: dst.to_string(),
        protocol: TransportProtocol::Udp,
        length: u32::try_from(packet.len()).unwrap_or(u32::MAX),
        signaling_type: Some(signaling_type),
        packet_hash: hex::encode(Sha256::digest(packet)),
    }
}

/// `pkt-<seq>-<hash prefix>`: unique per datagram, still tied to its content.
pub fn packet_correlation_id(seq: u64, packet_hash: &str) -> String {
    let prefix = packet_hash
        .get(..CORRELATION_HASH_CHARS)
        .unwrap_or(packet_hash);
    format!("pkt-{seq}-{prefix}")
}

/// Run one datagram through the pipeline.
///
/// With `prefilter` set, anything that is not a pulse is dropped before the
/// kernel is consulted. Such packets were never admitted, so they leave no
/// audit event.
pub async fn handle_datagram(
    adapter: &SentryAdapter,
    packet: &[u8],
    src: SocketAddr,
    dst: SocketAddr,
    seq: u64,
    prefilter: bool,
) -> SentryAction {
    if prefilter && !pulse::is_pulse(packet) {
        return SentryAction::Drop;
    }

    let metadata = packet_metadata(packet, src, dst);
    let correlation_id = packet_correlation_id(seq, &metadata.packet_hash);
    adapter.evaluate(metadata, &correlation_id).await
}

/// Receive loop. Returns only on socket failure.
pub async fn serve(socket: UdpSocket, adapter: Arc<SentryAdapter>, prefilter: bool) -> Result<()> {
    let local = socket
        .local_addr()
        .map_err(|e| ZakError::Internal(format!("udp local_addr failed: {e}")))?;
    let seq = AtomicU64::new(0);
    let mut buf = vec![0u8; MAX_DATAGRAM];

    tracing::info!(%local, prefilter, adapter = adapter.adapter_id(), "sentry listener active");

    loop {
        let (n, peer) = socket
            .recv_from(&mut buf)
            .await
            .map_err(|e| ZakError::Internal(format!("udp recv failed: {e}")))?;

        let packet = Bytes::copy_from_slice(buf.get(..n).unwrap_or_default());
        let id = seq.fetch_add(1, Ordering::Relaxed);
        let adapter = Arc::clone(&adapter);

        tokio::spawn(async move {
            let action = handle_datagram(&adapter, &packet, peer, local, id, prefilter).await;
            tracing::debug!(%peer, seq = id, action = %action, xdp = action.xdp_code(), "packet verdict");
        });
    }
}
