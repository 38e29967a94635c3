//! healthprobe CLI
//!
//! Runs one health check against `ENDPOINT_URL` and alerts through
//! `SLACK_WEBHOOK_URL`. Both are read from the env file.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use healthprobe::config::{self, Config, LoggingConfig};
use healthprobe::transport::HttpTransport;
use healthprobe::HealthCheck;

/// healthprobe - one-shot endpoint health check with webhook alerts
#[derive(Parser)]
#[command(name = "healthprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Env file holding ENDPOINT_URL and SLACK_WEBHOOK_URL
    #[arg(long, default_value = ".env", env = "HEALTHPROBE_ENV_FILE")]
    env_file: PathBuf,

    /// Append-only log file
    #[arg(long, default_value = "healthcheck.log", env = "HEALTHPROBE_LOG_FILE")]
    log_file: PathBuf,

    /// Number of sequential probes
    #[arg(long, default_value_t = config::DEFAULT_ATTEMPTS)]
    attempts: usize,

    /// Bad attempts tolerated before alerting
    #[arg(long, default_value_t = config::DEFAULT_MAX_BAD_ATTEMPTS)]
    max_bad_attempts: usize,

    /// Latency above which a probe counts as bad (e.g. "10s", "1500ms")
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    slow_threshold: Duration,

    /// Status code returned by a healthy endpoint
    #[arg(long, default_value_t = config::DEFAULT_EXPECTED_STATUS)]
    expected_status: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let logging = LoggingConfig {
        file: cli.log_file.clone(),
        level: if cli.verbose { "debug" } else { "info" }.to_string(),
    };
    let _guard = match healthprobe::logging::init_file_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error opening log file {}: {e}", cli.log_file.display());
            return ExitCode::FAILURE;
        }
    };

    // Load configuration
    let config = match load_config(&cli, logging) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Error loading configuration");
            return ExitCode::FAILURE;
        }
    };

    let check = match build_check(&config) {
        Ok(check) => check,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Error preparing health check");
            return ExitCode::FAILURE;
        }
    };

    check.run().await;
    ExitCode::SUCCESS
}

fn load_config(cli: &Cli, logging: LoggingConfig) -> anyhow::Result<Config> {
    config::load_env_file(&cli.env_file)
        .with_context(|| format!("loading env file {}", cli.env_file.display()))?;
    info!(env_file = %cli.env_file.display(), "Loaded environment");

    let mut config = Config::from_env().context("reading configuration from environment")?;
    config.probe.attempts = cli.attempts;
    config.probe.slow_threshold = cli.slow_threshold;
    config.probe.expected_status = cli.expected_status;
    config.alerting.max_bad_attempts = cli.max_bad_attempts;
    config.logging = logging;
    config.validate().context("validating configuration")?;
    Ok(config)
}

fn build_check(config: &Config) -> anyhow::Result<HealthCheck> {
    let transport = HttpTransport::new(&config.http).context("building HTTP client")?;
    HealthCheck::new(config, Arc::new(transport)).context("preparing health check")
}
