//! Campus kiosk wayfinding HTTP microservice.
//!
//! This service answers "how do I get from the kiosk to room X" with an
//! ordered list of floor-plan points and the total walking cost.
//!
//! # Endpoints
//!
//! - `POST /api/v1/routes` - Compute a route from the kiosk to a waypoint
//! - `GET /api/v1/waypoints` - List waypoints, optionally for one floor
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness check
//! - `GET /health/ready` - Kubernetes readiness check
//!
//! # Configuration
//!
//! - `CAMPUSNAV_DATA_PATH` - Path to the campus.db file
//! - `CAMPUSNAV_ORIGIN_CODE` - Waypoint code of the kiosk (default: kiosk)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus exporter toggle and path

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use campusnav_lib::{Route, Waypoint, list_waypoints, plan_route};
use campusnav_service_shared::{
    AppState, LoggingConfig, MetricsConfig, MetricsLayer, ProblemDetails, ProblemKind, RequestId,
    RouteRequest, ServiceConfig, ServiceResponse, Validate, WaypointQuery, from_lib_error,
    health_live, health_ready, init_logging, init_metrics, metrics_handler,
    record_route_calculated, record_route_failed, record_route_points, record_waypoints_listed,
};

const SERVICE_NAME: &str = "route";

/// Waypoint listing returned by `GET /api/v1/waypoints`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaypointList {
    #[serde(skip_serializing_if = "Option::is_none")]
    floor: Option<i32>,
    count: usize,
    waypoints: Vec<Waypoint>,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env()?;
    info!(
        data_path = %config.data_path.display(),
        origin = %config.origin_code,
        port = config.port,
        "starting route service"
    );

    let state = AppState::load(&config.data_path, &config.origin_code).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
        e
    })?;

    let app = app(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the service router around `state`, exposing metrics at `metrics_path`.
///
/// Kiosk front-ends are served from another origin, so CORS is open for the
/// two API methods.
fn app(state: AppState, metrics_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/routes", post(route_handler))
        .route("/api/v1/waypoints", get(waypoints_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .layer(cors)
        .with_state(state)
}

/// Handle POST /api/v1/routes requests.
async fn route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Response<Route> {
    let request_id = request_id.as_str();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_route_failed("validation_error", SERVICE_NAME);
            return Response::Error(ProblemDetails::bad_request(rejection.body_text(), request_id));
        }
    };

    info!(
        request_id,
        destination = %request.destination_code,
        only_accessible = request.only_accessible,
        "handling route request"
    );

    if let Err(problem) = request.validate(request_id) {
        record_route_failed("validation_error", SERVICE_NAME);
        return Response::Error(*problem);
    }

    let lib_request = request.to_lib(state.kiosk_code());
    let planned = state
        .run_blocking(move |store| plan_route(store, &lib_request))
        .await;
    let route = match planned {
        Ok(Ok(route)) => route,
        Ok(Err(e)) => {
            warn!(request_id, error = %e, reason = e.reason(), "route planning failed");
            record_route_failed(e.reason(), SERVICE_NAME);
            return Response::Error(from_lib_error(&e, request_id));
        }
        Err(e) => {
            error!(request_id, error = %e, "route planning task failed");
            record_route_failed("internal_error", SERVICE_NAME);
            return Response::Error(task_failed(request_id));
        }
    };

    record_route_calculated(request.only_accessible, SERVICE_NAME);
    record_route_points(route.points.len());

    info!(
        request_id,
        route_id = %route.route_id,
        points = route.points.len(),
        total_distance = route.total_distance,
        "route computed successfully"
    );

    Response::Success(ServiceResponse::new(route))
}

/// Handle GET /api/v1/waypoints requests.
async fn waypoints_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<WaypointQuery>, QueryRejection>,
) -> Response<WaypointList> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return Response::Error(ProblemDetails::bad_request(
                rejection.body_text(),
                request_id.as_str(),
            ));
        }
    };

    let floor = query.floor;
    match state
        .run_blocking(move |store| list_waypoints(store, floor))
        .await
    {
        Ok(Ok(waypoints)) => {
            record_waypoints_listed(waypoints.len(), SERVICE_NAME);
            Response::Success(ServiceResponse::new(WaypointList {
                floor: query.floor,
                count: waypoints.len(),
                waypoints,
            }))
        }
        Ok(Err(e)) => {
            error!(request_id = %request_id, error = %e, "waypoint listing failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "waypoint listing task failed");
            Response::Error(task_failed(request_id.as_str()))
        }
    }
}

fn task_failed(request_id: &str) -> ProblemDetails {
    ProblemDetails::of(
        ProblemKind::Internal,
        "the campus data task did not complete",
        request_id,
    )
}
