//! One health check run: probe, evaluate, maybe alert

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::alerting::{AlertEvaluator, Alerter, NotificationSender};
use crate::config::{Config, ENDPOINT_URL_VAR};
use crate::error::{Error, Result};
use crate::models::{AttemptSet, HealthVerdict, NotificationOutcome};
use crate::probe::Prober;
use crate::transport::Transport;

/// Everything observed during a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub attempts: AttemptSet,
    pub verdict: HealthVerdict,
    pub notification: NotificationOutcome,
}

/// A configured health check, ready to run once
pub struct HealthCheck {
    endpoint: Url,
    attempts: usize,
    prober: Prober,
    alerter: Alerter,
}

impl HealthCheck {
    /// Wire prober and alerter to a shared transport.
    ///
    /// Fails on configuration errors, before any request is made.
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let endpoint = config
            .probe
            .endpoint_url
            .clone()
            .ok_or_else(|| Error::config(format!("{ENDPOINT_URL_VAR} is not set")))?;

        let prober = Prober::from_config(Arc::clone(&transport), &config.probe)?;
        let alerter = Alerter::new(
            AlertEvaluator::from_config(&config.probe, &config.alerting),
            NotificationSender::new(transport, config.alerting.webhook_url.clone()),
            config.alerting.message.clone(),
        );

        Ok(Self {
            endpoint,
            attempts: config.probe.attempts,
            prober,
            alerter,
        })
    }

    /// Probe every attempt, then evaluate and alert. Always completes.
    pub async fn run(&self) -> RunReport {
        let attempts = self.prober.run(&self.endpoint, self.attempts).await;
        let (verdict, notification) = self.alerter.process(&attempts).await;

        info!(
            bad = verdict.bad_attempts,
            unhealthy = verdict.is_unhealthy(),
            notification = ?notification,
            "Health check finished"
        );

        RunReport {
            attempts,
            verdict,
            notification,
        }
    }
}
