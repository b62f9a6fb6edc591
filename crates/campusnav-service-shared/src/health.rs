//! Health check handlers for Kubernetes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness checks.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 time at which the check was answered.
    pub checked_at: String,

    /// Number of waypoints visible through the store (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints_loaded: Option<usize>,

    /// Whether the kiosk waypoint exists (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_configured: Option<bool>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            checked_at: now(),
            waypoints_loaded: None,
            origin_configured: None,
        }
    }

    /// Create a ready status with dataset information.
    pub fn ready(service: &str, version: &str, waypoints: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            checked_at: now(),
            waypoints_loaded: Some(waypoints),
            origin_configured: Some(true),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            checked_at: now(),
            waypoints_loaded: None,
            origin_configured: None,
        }
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Liveness check handler.
///
/// Returns 200 OK if the service is running. This is a simple check that does
/// not depend on external resources.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"campusnav-service-shared","version":"0.1.0","checked_at":"2026-03-02T10:00:00Z"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness check handler.
///
/// Returns 200 OK when the store answers and the kiosk waypoint is present.
/// The store is queried on every readiness check, so a dataset that
/// disappears or loses its kiosk flips the service to 503.
///
/// # Example
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"campusnav-service-shared","version":"0.1.0","checked_at":"2026-03-02T10:00:00Z","waypoints_loaded":14,"origin_configured":true}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let unavailable = |reason: &str, origin_configured: Option<bool>| {
        let mut status = HealthStatus::not_ready(service, version, reason);
        status.origin_configured = origin_configured;
        (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
    };

    let waypoints = match state.run_blocking(|store| store.waypoints()).await {
        Ok(Ok(waypoints)) => waypoints,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check could not read waypoints");
            return unavailable("store unreachable", None);
        }
        Err(e) => {
            tracing::error!(error = %e, "readiness check task failed");
            return unavailable("store unreachable", None);
        }
    };

    let kiosk = state.kiosk_code();
    if !waypoints.iter().any(|waypoint| waypoint.code == kiosk) {
        return unavailable("origin missing", Some(false));
    }

    let status = HealthStatus::ready(service, version, waypoints.len());
    (StatusCode::OK, Json(status)).into_response()
}
