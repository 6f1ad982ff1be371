//! Top-level facade crate for ZAK.
//!
//! Re-exports core contracts and the gateway library so users can depend on a single crate.

pub mod core {
    pub use zak_core::*;
}

pub mod gateway {
    pub use zak_gateway::*;
}
