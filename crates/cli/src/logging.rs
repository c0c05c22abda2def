//! Logging setup
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: tracing filter (default: `edison=warn`, or `edison=info` with `--verbose`)
//! - `EDISON_LOG_FORMAT`: `json` for structured output, anything else for pretty

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FORMAT_ENV: &str = "EDISON_LOG_FORMAT";

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "edison=info" } else { "edison=warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Failed to create env filter")?;

    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install JSON logger")?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install logger")?,
    }

    Ok(())
}
