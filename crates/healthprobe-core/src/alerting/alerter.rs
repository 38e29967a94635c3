//! Evaluate a run and notify when it breached the threshold

use tracing::{info, warn};

use super::evaluator::AlertEvaluator;
use super::notifier::NotificationSender;
use crate::models::{AttemptSet, HealthVerdict, NotificationOutcome};

/// Evaluates attempts once and sends at most one notification
pub struct Alerter {
    evaluator: AlertEvaluator,
    notifier: NotificationSender,
    message: String,
}

impl Alerter {
    /// Create a new alerter
    pub fn new(
        evaluator: AlertEvaluator,
        notifier: NotificationSender,
        message: impl Into<String>,
    ) -> Self {
        Self {
            evaluator,
            notifier,
            message: message.into(),
        }
    }

    /// Evaluate `attempts` and deliver the alert message if the endpoint is unhealthy.
    ///
    /// Delivery failures are logged and reported in the outcome, never returned as errors.
    pub async fn process(&self, attempts: &AttemptSet) -> (HealthVerdict, NotificationOutcome) {
        let verdict = self.evaluator.evaluate(attempts);

        let Some(attempt) = verdict.breached_at else {
            info!(
                bad = verdict.bad_attempts,
                total = attempts.len(),
                "Endpoint healthy"
            );
            return (verdict, NotificationOutcome::NotRequired);
        };

        warn!(
            bad = verdict.bad_attempts,
            max_bad = verdict.max_bad_attempts,
            breached_at = attempt,
            message = %self.message,
            "Alert triggered"
        );

        let outcome: NotificationOutcome = self.notifier.send(&self.message).await.into();
        (verdict, outcome)
    }
}
