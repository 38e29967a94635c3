//! Probe attempt models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single probe request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based position within the run
    pub number: usize,

    /// When the request was started
    pub started_at: DateTime<Utc>,

    /// Time from start until the request finished or failed
    #[serde(with = "humantime_serde")]
    pub response_time: Duration,

    /// Transport error or unexpected status; `None` means success
    pub error: Option<String>,
}

impl Attempt {
    /// Record a successful attempt
    pub fn success(number: usize, started_at: DateTime<Utc>, response_time: Duration) -> Self {
        Self {
            number,
            started_at,
            response_time,
            error: None,
        }
    }

    /// Record a failed attempt
    pub fn failure(
        number: usize,
        started_at: DateTime<Utc>,
        response_time: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            number,
            started_at,
            response_time,
            error: Some(error.into()).filter(|e: &String| !e.is_empty()),
        }
    }

    /// Latency in whole milliseconds, saturating at `u64::MAX`
    pub fn response_time_ms(&self) -> u64 {
        u64::try_from(self.response_time.as_millis()).unwrap_or(u64::MAX)
    }

    /// Whether the request failed at the transport level or returned the wrong status
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the attempt took longer than `slow_threshold`
    pub fn is_slow(&self, slow_threshold: Duration) -> bool {
        self.response_time > slow_threshold
    }

    /// An attempt is bad when it errored or was slow
    pub fn is_bad(&self, slow_threshold: Duration) -> bool {
        self.is_error() || self.is_slow(slow_threshold)
    }
}

/// The attempts of one run, in execution order.
///
/// Always holds exactly the number of attempts the run was configured for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptSet {
    attempts: Vec<Attempt>,
}

impl AttemptSet {
    /// Build a set, checking that every configured slot was filled.
    ///
    /// Returns `None` if `attempts.len() != expected`.
    pub fn new(attempts: Vec<Attempt>, expected: usize) -> Option<Self> {
        (attempts.len() == expected).then_some(Self { attempts })
    }

    /// Wrap attempts produced by a loop that fills every slot
    pub(crate) fn from_complete(attempts: Vec<Attempt>) -> Self {
        Self { attempts }
    }

    /// Number of attempts
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Iterate in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, Attempt> {
        self.attempts.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[Attempt] {
        &self.attempts
    }
}

impl<'a> IntoIterator for &'a AttemptSet {
    type Item = &'a Attempt;
    type IntoIter = std::slice::Iter<'a, Attempt>;

    fn into_iter(self) -> Self::IntoIter {
        self.attempts.iter()
    }
}
