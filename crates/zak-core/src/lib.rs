//! ZAK core: transport-agnostic contracts, error taxonomy, and the strict
//! monetary parser.
//!
//! This crate defines what crosses the trust boundary: the execution
//! envelope handed to the kernel, the result it returns, the audit event
//! shape, and the monetary representations a request may carry. It carries
//! no transport dependencies so both adapters (HTTP and packet telemetry)
//! and any future kernel binding can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `ZakError`/`Result` so hostile input can
//! never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod audit;
pub mod contract;
pub mod error;
pub mod money;
pub mod pulse;

/// Shared result type.
pub use error::{Result, ZakError};
