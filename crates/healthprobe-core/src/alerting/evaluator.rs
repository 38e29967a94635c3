//! Bad-attempt threshold evaluation

use std::time::Duration;
use tracing::debug;

use crate::config::{AlertingConfig, ProbeConfig};
use crate::models::{AttemptSet, HealthVerdict};

/// Counts bad attempts against a threshold
#[derive(Debug, Clone, Copy)]
pub struct AlertEvaluator {
    /// Bad attempts tolerated; one more breaches
    max_bad_attempts: usize,
    /// Latency ceiling for a good attempt
    slow_threshold: Duration,
}

impl AlertEvaluator {
    /// Create a new evaluator
    pub fn new(max_bad_attempts: usize, slow_threshold: Duration) -> Self {
        Self {
            max_bad_attempts,
            slow_threshold,
        }
    }

    /// Create an evaluator from configuration
    pub fn from_config(probe: &ProbeConfig, alerting: &AlertingConfig) -> Self {
        Self::new(alerting.max_bad_attempts, probe.slow_threshold)
    }

    /// Scan attempts in order, stopping at the first one that pushes the bad
    /// count past the threshold.
    pub fn evaluate(&self, attempts: &AttemptSet) -> HealthVerdict {
        let mut verdict = HealthVerdict {
            bad_attempts: 0,
            scanned: 0,
            max_bad_attempts: self.max_bad_attempts,
            breached_at: None,
        };

        for attempt in attempts {
            verdict.scanned += 1;
            if !attempt.is_bad(self.slow_threshold) {
                continue;
            }

            verdict.bad_attempts += 1;
            if verdict.bad_attempts > self.max_bad_attempts {
                verdict.breached_at = Some(attempt.number);
                break;
            }
        }

        debug!(
            bad = verdict.bad_attempts,
            scanned = verdict.scanned,
            max_bad = self.max_bad_attempts,
            breached = verdict.is_unhealthy(),
            "Evaluated attempts"
        );

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attempt;
    use chrono::Utc;
    use rstest::rstest;

    const SLOW: Duration = Duration::from_secs(10);

    /// Build a set where `true` marks a failed attempt
    fn attempts(pattern: &[bool]) -> AttemptSet {
        let now = Utc::now();
        let list: Vec<_> = pattern
            .iter()
            .enumerate()
            .map(|(i, &bad)| {
                if bad {
                    Attempt::failure(i + 1, now, Duration::from_millis(5), "connection refused")
                } else {
                    Attempt::success(i + 1, now, Duration::from_millis(200))
                }
            })
            .collect();
        AttemptSet::new(list, pattern.len()).unwrap()
    }

    #[rstest]
    #[case::all_good(&[false, false, false, false, false], 1, None)]
    #[case::one_bad(&[true, false, false, false, false], 1, None)]
    #[case::two_bad(&[true, false, true, false, false], 1, Some(3))]
    #[case::zero_tolerance(&[false, true, false], 0, Some(2))]
    #[case::threshold_equals_count(&[true, true, true], 3, None)]
    #[case::single_attempt(&[true], 0, Some(1))]
    fn test_threshold_boundaries(
        #[case] pattern: &[bool],
        #[case] max_bad: usize,
        #[case] breached_at: Option<usize>,
    ) {
        let verdict = AlertEvaluator::new(max_bad, SLOW).evaluate(&attempts(pattern));
        assert_eq!(verdict.breached_at, breached_at);
        assert_eq!(verdict.is_unhealthy(), breached_at.is_some());
    }

    #[test]
    fn test_stops_scanning_after_breach() {
        let set = attempts(&[true, true, true, true, true]);
        let verdict = AlertEvaluator::new(1, SLOW).evaluate(&set);
        assert_eq!(verdict.bad_attempts, 2);
        assert_eq!(verdict.scanned, 2);
        assert_eq!(verdict.breached_at, Some(2));
    }

    #[test]
    fn test_slow_attempt_counts_as_bad() {
        let now = Utc::now();
        let set = AttemptSet::new(
            vec![
                Attempt::success(1, now, Duration::from_secs(11)),
                Attempt::success(2, now, Duration::from_millis(100)),
                Attempt::success(3, now, Duration::from_secs(12)),
            ],
            3,
        )
        .unwrap();

        let verdict = AlertEvaluator::new(1, SLOW).evaluate(&set);
        assert_eq!(verdict.bad_attempts, 2);
        assert_eq!(verdict.breached_at, Some(3));
    }

    #[test]
    fn test_counts_all_when_healthy() {
        let set = attempts(&[false, true, false, false]);
        let verdict = AlertEvaluator::new(1, SLOW).evaluate(&set);
        assert_eq!(verdict.scanned, 4);
        assert_eq!(verdict.bad_attempts, 1);
        assert!(!verdict.is_unhealthy());
    }
}
