//! Error types for healthprobe

use thiserror::Error;

/// Result type alias using healthprobe's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for healthprobe operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured URL could not be parsed
    #[error("Invalid URL for {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// Environment file could not be loaded
    #[error("Error loading env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete within its deadline
    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid URL error for the named setting
    pub fn invalid_url(name: &'static str, source: url::ParseError) -> Self {
        Self::InvalidUrl { name, source }
    }

    /// Create a logging error
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    /// Render the error together with its source chain on one line
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }

    /// Whether this error should stop the process before any probe runs
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidUrl { .. } | Self::EnvFile(_) | Self::Logging(_)
        )
    }
}
