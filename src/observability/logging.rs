//! # Logging
//!
//! Installs the global tracing subscriber. Logs are written to stderr so the
//! CLI's stdout stays machine-readable.

use crate::config::ControllerConfig;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` wins, otherwise `LOG_LEVEL` applies to this crate
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "app_service_certificate={level},appcertctl={level},warn",
            level = log_level.to_lowercase()
        ))
    })
}

/// Initialize the global tracing subscriber
///
/// `LOG_FORMAT=json` selects JSON lines, anything else human-readable text.
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init_logging(config: &ControllerConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.log_enable_color).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
