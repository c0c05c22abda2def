//! HTTP transport configuration
//!
//! # Environment Variables
//!
//! - `EDISON_BASE_URL`: service base URL (default: `https://api.platform.edisonscientific.com`)
//! - `EDISON_API_TIMEOUT`: per-request timeout in seconds (default: 30)
//! - `EDISON_VERIFY_SSL`: set to `false` to skip TLS certificate checks (default: true)

use edison_core::application::PollConfig;
use edison_core::port::TransportError;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.platform.edisonscientific.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "EDISON_BASE_URL";
pub const TIMEOUT_ENV: &str = "EDISON_API_TIMEOUT";
pub const VERIFY_SSL_ENV: &str = "EDISON_VERIFY_SSL";

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    base_url: Url,
    pub timeout: Duration,
    pub verify_ssl: bool,
    pub user_agent: String,
    pub poll: PollConfig,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: normalize(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_ssl: true,
            user_agent: format!("edison-platform-rs/{}", edison_core::VERSION),
            poll: PollConfig::default(),
        }
    }
}

impl HttpTransportConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, TransportError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TransportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    value = %raw,
                    default = DEFAULT_TIMEOUT_SECS,
                    "{} must be a positive integer; using default", TIMEOUT_ENV
                ),
            }
        }

        if let Some(raw) = lookup(VERIFY_SSL_ENV) {
            config.verify_ssl = !raw.trim().eq_ignore_ascii_case("false");
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url.trim()).map_err(|e| {
            TransportError::InvalidRequest(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(TransportError::InvalidRequest(format!(
                "Invalid base URL '{}': not a base URL",
                base_url
            )));
        }
        self.base_url = normalize(parsed);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the base URL (`path` without leading slash)
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(format!("Invalid endpoint '{}': {}", path, e)))
    }
}

// Trailing slash so `join` appends instead of replacing the last segment
fn normalize(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
