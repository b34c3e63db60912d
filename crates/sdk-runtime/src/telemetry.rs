//! # Logging Setup
//!
//! `tracing-subscriber` with an `EnvFilter` and either human-readable or JSON
//! output. Host applications that install their own subscriber can skip this.

use std::env;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (`info`, `zs_04_consensus_query=debug`, ...).
    pub level: String,
    /// JSON lines instead of pretty output.
    pub json: bool,
    /// Include the event target.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Read `ZCN_LOG_LEVEL` (or `RUST_LOG`) and `ZCN_JSON_LOGS`.
    pub fn from_env() -> Self {
        Self {
            level: env::var("ZCN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json: env::var("ZCN_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            with_target: true,
        }
    }

    fn filter(&self) -> Result<EnvFilter, TelemetryError> {
        EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::Filter(e.to_string()))
    }
}

/// Install the global subscriber.
///
/// Fails with [`TelemetryError::Init`] when one is already installed, so a
/// second call is harmless.
pub fn init_logging(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = config.filter()?;

    if config.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_thread_ids(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_ansi(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::debug!(level = %config.level, json = config.json, "[sdk] logging initialized");
    Ok(())
}
