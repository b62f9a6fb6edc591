//! Shared infrastructure for campusnav HTTP services.
//!
//! This crate provides common functionality used by the kiosk route service:
//!
//! - [`AppState`]: Campus data provider plus the configured kiosk code
//! - [`ServiceConfig`]: Environment-driven startup configuration
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness checks
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all routing logic resides
//! in `campusnav-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate parameters                                      │
//! │  - Call campusnav-lib APIs                                  │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides an in-memory fixture state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, DEFAULT_PORT, ORIGIN_CODE_ENV, SERVICE_PORT_ENV};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_calculated, record_route_failed,
    record_route_points, record_waypoints_listed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, ProblemKind, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_ORIGIN_NOT_CONFIGURED, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNKNOWN_WAYPOINT,
};
pub use request::{RouteRequest, Validate, WaypointQuery, MAX_CODE_LENGTH};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
