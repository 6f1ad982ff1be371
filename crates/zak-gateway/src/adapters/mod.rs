//! Transport adapters.
//!
//! Both adapters run the same Ingest -> Execute -> Emit pipeline over the
//! shared envelope contract; they differ only in what they ingest and what
//! they emit.

pub mod http;
pub mod sentry;

pub use http::{HttpAdapter, HttpIngest, HttpOutput};
pub use sentry::{SentryAction, SentryAdapter};
