//! Endpoint probing
//!
//! Issues the configured number of GET requests and records latency and
//! error state for each one.

mod prober;

pub use prober::Prober;
