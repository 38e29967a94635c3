//! Health verdict derived from a run's attempts

use serde::{Deserialize, Serialize};

/// Result of scanning an [`AttemptSet`](super::AttemptSet) against the bad-attempt threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    /// Bad attempts counted before scanning stopped
    pub bad_attempts: usize,

    /// Attempts examined; less than the set length when the threshold was breached early
    pub scanned: usize,

    /// Bad attempts tolerated
    pub max_bad_attempts: usize,

    /// 1-based attempt number at which the threshold was exceeded
    pub breached_at: Option<usize>,
}

impl HealthVerdict {
    /// Whether the endpoint is considered unhealthy
    pub fn is_unhealthy(&self) -> bool {
        self.breached_at.is_some()
    }
}

/// Notification outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    /// Endpoint was healthy, nothing sent
    NotRequired,
    /// Webhook accepted the notification
    Sent,
    /// Delivery failed; the run still completes normally
    Failed { reason: String },
}
