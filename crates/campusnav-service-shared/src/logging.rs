//! Tracing subscriber setup for the wayfinding services.
//!
//! Production deployments ship JSON lines (one object per event, with the
//! enclosing request span attached); local runs can switch to the pretty
//! multi-line formatter with `LOG_FORMAT=text`.
//!
//! ```no_run
//! use campusnav_service_shared::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env().with_service("route"));
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Event formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    /// Pretty, human-oriented output.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("text") || value.trim().eq_ignore_ascii_case("pretty")
        {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

/// Logging settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is not set at init time.
    pub level: String,
    /// Logged once the subscriber is installed.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::from_parts(None, None)
    }
}

impl LoggingConfig {
    /// Read `LOG_FORMAT` and `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var("LOG_FORMAT").ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
        )
    }

    /// Build settings from raw variable values. Blank values count as unset.
    pub fn from_parts(format: Option<&str>, level: Option<&str>) -> Self {
        let level = level
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LEVEL);

        Self {
            format: format.map(LogFormat::parse).unwrap_or_default(),
            level: level.to_string(),
            service: None,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}

/// Install the global subscriber.
///
/// Only the first call installs anything; later calls (test binaries,
/// embedding) leave the existing subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            service = config.service.as_deref().unwrap_or("campusnav"),
            format = ?config.format,
            level = %config.level,
            "logging initialized"
        );
    }
}
