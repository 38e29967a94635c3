//! Sequential endpoint probing

use chrono::Utc;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::models::{Attempt, AttemptSet};
use crate::transport::Transport;

/// Issues a fixed number of GET requests against one endpoint
pub struct Prober {
    transport: Arc<dyn Transport>,
    expected_status: StatusCode,
    slow_threshold: Duration,
}

impl Prober {
    /// Create a prober expecting `expected_status` from healthy responses
    pub fn new(
        transport: Arc<dyn Transport>,
        expected_status: StatusCode,
        slow_threshold: Duration,
    ) -> Self {
        Self {
            transport,
            expected_status,
            slow_threshold,
        }
    }

    /// Create a prober from the probe section of the configuration
    pub fn from_config(transport: Arc<dyn Transport>, config: &ProbeConfig) -> Result<Self> {
        let expected_status = StatusCode::from_u16(config.expected_status).map_err(|_| {
            Error::config(format!(
                "{} is not a valid HTTP status code",
                config.expected_status
            ))
        })?;
        Ok(Self::new(transport, expected_status, config.slow_threshold))
    }

    /// Probe `url` exactly `attempts` times, one request after another.
    ///
    /// Failed attempts never stop the loop.
    pub async fn run(&self, url: &Url, attempts: usize) -> AttemptSet {
        info!(url = %url, attempts, "Probing endpoint");

        let mut results = Vec::with_capacity(attempts);
        for number in 1..=attempts {
            results.push(self.probe_once(url, number).await);
        }

        AttemptSet::from_complete(results)
    }

    async fn probe_once(&self, url: &Url, number: usize) -> Attempt {
        let started_at = Utc::now();
        let start = Instant::now();
        let outcome = self.transport.get(url).await;
        let response_time = start.elapsed();

        let attempt = match outcome {
            Ok(status) if status == self.expected_status => {
                Attempt::success(number, started_at, response_time)
            }
            Ok(status) => Attempt::failure(
                number,
                started_at,
                response_time,
                format!("response status {status}"),
            ),
            Err(e) => Attempt::failure(number, started_at, response_time, e.describe()),
        };

        if attempt.is_bad(self.slow_threshold) {
            warn!(
                attempt = number,
                response_time_ms = attempt.response_time_ms(),
                error = attempt.error.as_deref().unwrap_or("slow response"),
                "Probe attempt bad"
            );
        } else {
            debug!(
                attempt = number,
                response_time_ms = attempt.response_time_ms(),
                "Probe attempt ok"
            );
        }

        attempt
    }
}
