//! Prometheus metrics for the wayfinding services.
//!
//! HTTP request metrics are recorded by [`crate::MetricsLayer`]; this module
//! owns the recorder, the exposition handler and the route-planning counters.
//!
//! | Metric | Kind | Labels |
//! |--------|------|--------|
//! | `campusnav_routes_calculated_total` | counter | `accessible`, `service` |
//! | `campusnav_routes_failed_total` | counter | `reason`, `service` |
//! | `campusnav_route_points` | histogram | |
//! | `campusnav_waypoint_listings_total` | counter | `service` |
//! | `campusnav_waypoints_listed` | histogram | |
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use campusnav_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! let config = MetricsConfig::from_env();
//! if init_metrics(&config).is_ok() {
//!     let app: Router = Router::new().route(&config.path, get(metrics_handler));
//! }
//! ```

use axum::http::header;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROUTES_CALCULATED: &str = "campusnav_routes_calculated_total";
pub const ROUTES_FAILED: &str = "campusnav_routes_failed_total";
pub const ROUTE_POINTS: &str = "campusnav_route_points";
pub const WAYPOINT_LISTINGS: &str = "campusnav_waypoint_listings_total";
pub const WAYPOINTS_LISTED: &str = "campusnav_waypoints_listed";

const DEFAULT_METRICS_PATH: &str = "/metrics";
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Whether the exporter is installed and where it is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Router path of the exposition endpoint, always starting with `/`.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` and `METRICS_PATH`.
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var("METRICS_ENABLED").ok().as_deref(),
            std::env::var("METRICS_PATH").ok().as_deref(),
        )
    }

    /// Build the configuration from raw variable values.
    ///
    /// Only `false`, `0` and `off` disable the exporter. A path without a
    /// leading slash gets one, and a blank path falls back to `/metrics`.
    pub fn from_parts(enabled: Option<&str>, path: Option<&str>) -> Self {
        let enabled = enabled
            .map(|value| {
                !matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "false" | "0" | "off"
                )
            })
            .unwrap_or(true);

        let path = match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) if p.starts_with('/') => p.to_string(),
            Some(p) => format!("/{p}"),
            None => DEFAULT_METRICS_PATH.to_string(),
        };

        Self { enabled, path }
    }
}

/// Errors from [`init_metrics`].
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the global Prometheus recorder.
///
/// # Errors
///
/// Fails when metrics are disabled or a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Handle of the installed recorder, if any.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Serve the Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    let body = PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# metrics recorder not installed\n".to_string());

    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body)
}

pub fn record_route_calculated(only_accessible: bool, service: &str) {
    metrics::counter!(
        ROUTES_CALCULATED,
        "accessible" => if only_accessible { "true" } else { "false" },
        "service" => service.to_string()
    )
    .increment(1);
}

/// Count a failed route request under a stable `reason` tag, normally
/// `campusnav_lib::Error::reason()` or `validation_error`.
pub fn record_route_failed(reason: &str, service: &str) {
    metrics::counter!(
        ROUTES_FAILED,
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

pub fn record_route_points(points: usize) {
    metrics::histogram!(ROUTE_POINTS).record(points as f64);
}

pub fn record_waypoints_listed(count: usize, service: &str) {
    metrics::counter!(WAYPOINT_LISTINGS, "service" => service.to_string()).increment(1);
    metrics::histogram!(WAYPOINTS_LISTED).record(count as f64);
}
