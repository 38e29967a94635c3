//! Alerting for healthprobe
//!
//! Counts bad attempts against a threshold and delivers a webhook notification.

mod alerter;
mod evaluator;
mod notifier;

pub use alerter::Alerter;
pub use evaluator::AlertEvaluator;
pub use notifier::{NotificationError, NotificationResult, NotificationSender};
