//! Structured logging configuration.
//!
//! The terminal belongs to the TUI while the client runs, so log output goes
//! to a file. Records emitted by the `podium` library through the `log`
//! facade are forwarded into the same subscriber.

use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Initialize logging into `log_file`, appending to it.
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a global subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use podium_client::logging;
///
/// logging::init("podium_client.log".as_ref()).unwrap();
/// tracing::info!("Client starting");
/// ```
pub fn init(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(path = %log_file.display(), "Structured logging initialized");
    Ok(())
}

/// Log the outcome of an HTTP call to the tournament service
pub fn log_api_request(method: &str, path: &str, status_code: Option<u16>, duration_ms: u64) {
    match status_code {
        Some(status) if status < 400 => tracing::info!(
            http_method = method,
            http_path = path,
            http_status = status,
            duration_ms = duration_ms,
            "API request completed"
        ),
        Some(status) => tracing::warn!(
            http_method = method,
            http_path = path,
            http_status = status,
            duration_ms = duration_ms,
            "API request rejected"
        ),
        None => tracing::warn!(
            http_method = method,
            http_path = path,
            duration_ms = duration_ms,
            "API request failed without a response"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_log_api_request() {
        // Just ensure it doesn't panic without a subscriber
        log_api_request("GET", "/api/tournaments/1/participants", Some(200), 45);
        log_api_request("POST", "/api/tournaments/1/finalize", Some(409), 120);
        log_api_request("POST", "/api/tournaments/1/finalize", None, 3000);
    }
}
