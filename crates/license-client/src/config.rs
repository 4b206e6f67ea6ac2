//! Client Configuration

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Which query source backs the screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Static fixtures with artificial latency
    #[default]
    Mock,

    /// The license API
    Remote,
}

impl SourceKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(SourceKind::Mock),
            "remote" => Ok(SourceKind::Remote),
            other => Err(ClientError::Config(format!("unknown license source: {other}"))),
        }
    }
}

/// License API client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the license API
    pub api_url: String,

    pub source: SourceKind,

    /// First retry delay; doubles per attempt
    pub retry_base_delay: Duration,

    /// Artificial latency of the mock project lookup
    pub mock_latency: Duration,

    /// Request timeout in seconds (ignored in the browser)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".into(),
            source: SourceKind::Mock,
            retry_base_delay: Duration::from_millis(1000),
            mock_latency: Duration::from_millis(500),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Read `LICENSE_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (process env, compile-time env, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let source = match lookup("LICENSE_SOURCE") {
            Some(value) => SourceKind::parse(&value)?,
            None => defaults.source,
        };

        let millis = |key: &str, default: Duration| -> Result<Duration> {
            lookup(key).map_or(Ok(default), |value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ClientError::Config(format!("{key} must be milliseconds")))
            })
        };

        let timeout_secs = match lookup("LICENSE_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ClientError::Config("LICENSE_TIMEOUT_SECS must be seconds".into()))?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            api_url: lookup("LICENSE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            source,
            retry_base_delay: millis("LICENSE_RETRY_DELAY_MS", defaults.retry_base_delay)?,
            mock_latency: millis("LICENSE_MOCK_LATENCY_MS", defaults.mock_latency)?,
            timeout_secs,
        })
    }
}
