//! Kernel bindings available to the gateway binary.
//!
//! The real kernel is injected by the deployment; this module only carries
//! the stand-in used by the pilot bootstrap.

pub mod pilot;

pub use pilot::PilotKernel;
