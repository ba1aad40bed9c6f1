//! Tracing subscriber setup
//!
//! Console output is always enabled and filtered by `RUST_LOG` or the CLI log
//! level. When a log file is configured, a second non-ANSI layer appends
//! records at or above the configured file level to it.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Build the console filter directive for a CLI log level
pub fn console_filter(log_level: &str) -> String {
    if log_level == "trace" {
        format!("igdb_proxy={log_level},tower_http=trace")
    } else {
        format!("igdb_proxy={log_level}")
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(log_level: &str, logging: &LoggingConfig) -> Result<()> {
    let file_layer = match &logging.log_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(logging.file_level_filter()?),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| console_filter(log_level).into()),
            ),
        )
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_filter_directives() {
        assert_eq!(console_filter("info"), "igdb_proxy=info");
        assert_eq!(console_filter("trace"), "igdb_proxy=trace,tower_http=trace");
    }
}
