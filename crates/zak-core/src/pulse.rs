//! ZAK pulse recognition (panic-free).
//!
//! A pulse is a fixed 64-byte keep-alive datagram whose first four bytes are
//! the big-endian magic `0x5A414B00` ("ZAK\0"). Anything else is not a pulse.
//! The check is stateless and allocation-free so it can run as a cheap
//! pre-filter ahead of the kernel.
//!
//! Parsing rules:
//! - Never index (`buf[0]`); always go through `Buf` after a length check.
//! - Never `unwrap()` / `expect()` / `panic!()`.

use bytes::Buf;

/// Pulse magic, big-endian on the wire.
pub const PULSE_MAGIC: u32 = 0x5A41_4B00;

/// Exact pulse size in bytes.
pub const PULSE_LEN: usize = 64;

/// Returns true when `packet` is a well-formed pulse.
pub fn is_pulse(packet: &[u8]) -> bool {
    if packet.len() != PULSE_LEN {
        return false;
    }
    let mut buf = packet;
    buf.get_u32() == PULSE_MAGIC
}
