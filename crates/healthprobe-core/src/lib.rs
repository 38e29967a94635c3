//! # healthprobe
//!
//! One-shot health check for a single HTTP endpoint.
//!
//! A run issues a fixed number of sequential GET requests, counts the attempts
//! that failed or were slow, and posts a message to a Slack-style incoming
//! webhook when too many were bad. It is meant to be invoked periodically by
//! an external scheduler such as cron.
//!
//! ## Architecture
//!
//! - **Probe**: sequential GETs recording latency and error per attempt
//! - **Alerting**: threshold evaluation and webhook delivery
//! - **Transport**: the single HTTP client shared by both
//!
//! ## Quick Start
//!
//! ```bash
//! echo 'ENDPOINT_URL=https://example.com/health' > .env
//! echo 'SLACK_WEBHOOK_URL=https://hooks.slack.com/services/...' >> .env
//! healthprobe
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod check;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod probe;
pub mod transport;

pub use check::{HealthCheck, RunReport};
pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::check::{HealthCheck, RunReport};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::transport::{HttpTransport, Transport, TransportResponse};
}
