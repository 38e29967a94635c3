//! Notification delivery for alerts

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::{parse_url, WEBHOOK_URL_VAR};
use crate::models::NotificationOutcome;
use crate::transport::Transport;

/// Result of sending a notification
#[derive(Debug, Clone)]
pub struct NotificationResult {
    pub success: bool,
    pub error: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl From<NotificationResult> for NotificationOutcome {
    fn from(result: NotificationResult) -> Self {
        match result.error {
            None if result.success => NotificationOutcome::Sent,
            error => NotificationOutcome::Failed {
                reason: error.unwrap_or_else(|| "unknown delivery failure".to_string()),
            },
        }
    }
}

/// Posts alert messages to an incoming webhook
pub struct NotificationSender {
    transport: Arc<dyn Transport>,
    webhook_url: Option<String>,
}

impl NotificationSender {
    /// Create a sender for `webhook_url`, which may be unset
    pub fn new(transport: Arc<dyn Transport>, webhook_url: Option<String>) -> Self {
        Self {
            transport,
            webhook_url,
        }
    }

    /// Send `message`, logging any failure instead of returning it
    pub async fn send(&self, message: &str) -> NotificationResult {
        let sent_at = Utc::now();
        let result = self.send_slack(message).await;

        if let Err(e) = &result {
            error!(error = %e, "Failed to deliver alert notification");
        }

        NotificationResult {
            success: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            sent_at,
        }
    }

    /// Send Slack notification
    async fn send_slack(&self, message: &str) -> Result<(), NotificationError> {
        let raw_url = self.webhook_url.as_deref().ok_or_else(|| {
            NotificationError::ConfigError(format!("{WEBHOOK_URL_VAR} is not set"))
        })?;
        let url = parse_url(WEBHOOK_URL_VAR, raw_url)
            .map_err(|e| NotificationError::ConfigError(e.to_string()))?;

        let payload = serde_json::to_value(SlackPayload { text: message })
            .map_err(|e| NotificationError::SerializationError(e.to_string()))?;

        let response = self
            .transport
            .post_json(&url, &payload)
            .await
            .map_err(|e| NotificationError::HttpError(e.describe()))?;

        if !response.status.is_success() {
            return Err(NotificationError::HttpError(format!(
                "Slack returned {}: {}",
                response.status, response.body
            )));
        }

        info!(host = url.host_str().unwrap_or_default(), "Slack notification sent");
        Ok(())
    }
}

/// Notification errors
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Slack incoming webhook payload
#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
}
