//! Configuration management for healthprobe
//!
//! Endpoint and webhook URLs come from the process environment, which is
//! populated from an env file at startup. Tunables carry documented defaults
//! and are overridden from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the URL to probe
pub const ENDPOINT_URL_VAR: &str = "ENDPOINT_URL";

/// Environment variable holding the incoming webhook URL
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";

/// Environment variable overriding the alert text
pub const ALERT_MESSAGE_VAR: &str = "ALERT_MESSAGE";

/// Number of probes issued per run
pub const DEFAULT_ATTEMPTS: usize = 5;

/// Bad attempts tolerated before alerting; one more triggers a notification
pub const DEFAULT_MAX_BAD_ATTEMPTS: usize = 1;

/// Status code the endpoint answers with when healthy (202 Accepted)
pub const DEFAULT_EXPECTED_STATUS: u16 = 202;

/// Latency above which a successful probe still counts as bad
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_secs(10);

/// Text posted to the webhook when the endpoint is unhealthy
pub const DEFAULT_ALERT_MESSAGE: &str =
    "Health check failed: the monitored endpoint is not responding as expected!";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Probe configuration
    pub probe: ProbeConfig,

    /// Alerting configuration
    pub alerting: AlertingConfig,

    /// Shared HTTP client configuration
    pub http: HttpClientConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// A missing or malformed endpoint URL is fatal. A missing webhook URL is
    /// not: it only matters once a notification has to be delivered.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        let endpoint = std::env::var(ENDPOINT_URL_VAR)
            .map_err(|_| Error::config(format!("{ENDPOINT_URL_VAR} is not set")))?;
        config.probe.endpoint_url = Some(parse_url(ENDPOINT_URL_VAR, &endpoint)?);

        config.alerting.webhook_url = std::env::var(WEBHOOK_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty());

        if let Ok(message) = std::env::var(ALERT_MESSAGE_VAR) {
            if !message.trim().is_empty() {
                config.alerting.message = message;
            }
        }

        Ok(config)
    }

    /// Check the tunables before probing starts
    pub fn validate(&self) -> Result<()> {
        if self.probe.endpoint_url.is_none() {
            return Err(Error::config(format!("{ENDPOINT_URL_VAR} is not set")));
        }
        if self.probe.attempts == 0 {
            return Err(Error::config("attempt count must be at least 1"));
        }
        if reqwest::StatusCode::from_u16(self.probe.expected_status).is_err() {
            return Err(Error::config(format!(
                "{} is not a valid HTTP status code",
                self.probe.expected_status
            )));
        }
        Ok(())
    }
}

/// Load `KEY=value` pairs from an env file into the process environment.
///
/// Variables already present in the environment are left untouched.
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path)?;
    Ok(())
}

/// Parse a URL setting, naming the setting on failure
pub fn parse_url(name: &'static str, value: &str) -> Result<Url> {
    Url::parse(value.trim()).map_err(|e| Error::invalid_url(name, e))
}

/// Probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Target URL
    pub endpoint_url: Option<Url>,
    /// Number of sequential probes per run
    pub attempts: usize,
    /// Status code considered healthy
    pub expected_status: u16,
    /// Latency ceiling for a probe to count as good
    #[serde(with = "humantime_serde")]
    pub slow_threshold: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            attempts: DEFAULT_ATTEMPTS,
            expected_status: DEFAULT_EXPECTED_STATUS,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }
}

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Incoming webhook URL; unset means delivery fails when attempted
    pub webhook_url: Option<String>,
    /// Bad attempts tolerated before a notification is sent
    pub max_bad_attempts: usize,
    /// Text of the notification
    pub message: String,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            max_bad_attempts: DEFAULT_MAX_BAD_ATTEMPTS,
            message: DEFAULT_ALERT_MESSAGE.to_string(),
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Overall per-request deadline
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connection setup deadline (TCP and TLS)
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Wait for response headers once connected
    #[serde(with = "humantime_serde")]
    pub response_header_timeout: Duration,
    /// Reuse connections between requests
    pub keep_alive: bool,
    /// Idle connections kept per host
    pub max_idle_per_host: usize,
    /// Follow 3xx responses
    pub follow_redirects: bool,
    /// Honour proxy variables from the environment
    pub use_env_proxy: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            response_header_timeout: Duration::from_secs(5),
            keep_alive: false,
            max_idle_per_host: 1,
            follow_redirects: false,
            use_env_proxy: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append-only log file
    pub file: PathBuf,
    /// Log level used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("healthcheck.log"),
            level: "info".to_string(),
        }
    }
}
