//! RFC 9457 problem documents for failed requests.
//!
//! Every failure the service can report is a [`ProblemKind`]; the kind fixes
//! the problem type URI, title and status so handlers only supply the detail
//! text and the request id.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use campusnav_lib::Error as LibError;

pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";
pub const PROBLEM_UNKNOWN_WAYPOINT: &str = "/problems/unknown-waypoint";
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";
pub const PROBLEM_ORIGIN_NOT_CONFIGURED: &str = "/problems/origin-not-configured";
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Failure classes reported by the wayfinding API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Malformed body or failed field validation (400).
    InvalidRequest,
    /// A waypoint code matched nothing (404).
    UnknownWaypoint,
    /// Both ends exist but are not connected (404).
    RouteNotFound,
    /// The kiosk waypoint is absent from the dataset (500).
    OriginNotConfigured,
    /// The dataset cannot be opened (503).
    ServiceUnavailable,
    Internal,
}

impl ProblemKind {
    pub const fn type_uri(self) -> &'static str {
        match self {
            Self::InvalidRequest => PROBLEM_INVALID_REQUEST,
            Self::UnknownWaypoint => PROBLEM_UNKNOWN_WAYPOINT,
            Self::RouteNotFound => PROBLEM_ROUTE_NOT_FOUND,
            Self::OriginNotConfigured => PROBLEM_ORIGIN_NOT_CONFIGURED,
            Self::ServiceUnavailable => PROBLEM_SERVICE_UNAVAILABLE,
            Self::Internal => PROBLEM_INTERNAL_ERROR,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid Request",
            Self::UnknownWaypoint => "Unknown Waypoint",
            Self::RouteNotFound => "Route Not Found",
            Self::OriginNotConfigured => "Origin Not Configured",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::Internal => "Internal Error",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::UnknownWaypoint | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::OriginNotConfigured | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Body of an `application/problem+json` response.
///
/// ```
/// use campusnav_service_shared::{ProblemDetails, ProblemKind};
///
/// let problem = ProblemDetails::of(ProblemKind::RouteNotFound, "No route exists from 'kiosk' to 'deposito'", "req-1");
/// assert_eq!(problem.status, 404);
/// assert_eq!(problem.type_uri, "/problems/route-not-found");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request id of the failed call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub content_type: String,
}

impl ProblemDetails {
    /// Problem of `kind` with a detail message, tagged with `request_id`.
    pub fn of(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            type_uri: kind.type_uri().to_string(),
            title: kind.title().to_string(),
            status: kind.status().as_u16(),
            detail: Some(detail.into()),
            instance: Some(request_id.into()),
            content_type: PROBLEM_CONTENT_TYPE.to_string(),
        }
    }

    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// 404 for a code nothing matched, listing close codes when there are any.
    pub fn unknown_waypoint(
        code: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = match suggestions {
            [] => format!("Waypoint '{code}' not found"),
            _ => format!(
                "Waypoint '{code}' not found. Did you mean: {}?",
                suggestions.join(", ")
            ),
        };
        Self::of(ProblemKind::UnknownWaypoint, detail, request_id)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.title, detail),
            None => f.write_str(&self.title),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Map a library failure onto the problem document returned to the kiosk.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownWaypoint { code, suggestions } => {
            ProblemDetails::unknown_waypoint(code, suggestions, request_id)
        }
        LibError::RouteNotFound {
            origin,
            destination,
        } => ProblemDetails::of(
            ProblemKind::RouteNotFound,
            format!("No route exists from '{origin}' to '{destination}'"),
            request_id,
        ),
        LibError::OriginNotConfigured { code } => ProblemDetails::of(
            ProblemKind::OriginNotConfigured,
            format!("Origin waypoint '{code}' is missing from the campus data"),
            request_id,
        ),
        LibError::DatasetNotFound { path } => ProblemDetails::of(
            ProblemKind::ServiceUnavailable,
            format!("Dataset not available at {}", path.display()),
            request_id,
        ),
        other => ProblemDetails::of(ProblemKind::Internal, other.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_have_distinct_type_uris() {
        let kinds = [
            ProblemKind::InvalidRequest,
            ProblemKind::UnknownWaypoint,
            ProblemKind::RouteNotFound,
            ProblemKind::OriginNotConfigured,
            ProblemKind::ServiceUnavailable,
            ProblemKind::Internal,
        ];
        let mut uris: Vec<_> = kinds.iter().map(|k| k.type_uri()).collect();
        uris.sort_unstable();
        uris.dedup();
        assert_eq!(uris.len(), kinds.len());
    }

    #[test]
    fn test_bad_request_serialization() {
        let problem = ProblemDetails::bad_request("destinationCode must not be empty", "req-test");
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], PROBLEM_INVALID_REQUEST);
        assert_eq!(json["title"], "Invalid Request");
        assert_eq!(json["status"], 400);
        assert_eq!(json["instance"], "req-test");
        assert_eq!(json["content_type"], "application/problem+json");
    }

    #[test]
    fn test_unknown_waypoint_with_suggestions() {
        let suggestions = vec!["sala-201".to_string(), "sala-101".to_string()];
        let problem = ProblemDetails::unknown_waypoint("sala-21", &suggestions, "req-456");

        assert_eq!(problem.status, 404);
        assert_eq!(
            problem.detail.as_deref(),
            Some("Waypoint 'sala-21' not found. Did you mean: sala-201, sala-101?")
        );
    }

    #[test]
    fn test_unknown_waypoint_no_suggestions() {
        let problem = ProblemDetails::unknown_waypoint("nonexistent", &[], "req-789");
        assert_eq!(problem.detail.as_deref(), Some("Waypoint 'nonexistent' not found"));
    }

    #[test]
    fn test_into_response_sets_problem_media_type() {
        let response =
            ProblemDetails::of(ProblemKind::ServiceUnavailable, "down", "r").into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }

    #[test]
    fn test_from_lib_error_route_not_found() {
        let error = LibError::RouteNotFound {
            origin: "kiosk".to_string(),
            destination: "deposito".to_string(),
        };
        let problem = from_lib_error(&error, "req-route");

        assert_eq!(problem.type_uri, PROBLEM_ROUTE_NOT_FOUND);
        assert_eq!(problem.status, 404);
        assert!(problem.detail.as_deref().unwrap().contains("deposito"));
    }

    #[test]
    fn test_from_lib_error_origin_not_configured() {
        let error = LibError::OriginNotConfigured {
            code: "kiosk".to_string(),
        };
        let problem = from_lib_error(&error, "req-origin");

        assert_eq!(problem.type_uri, PROBLEM_ORIGIN_NOT_CONFIGURED);
        assert_eq!(problem.status, 500);
    }

    #[test]
    fn test_from_lib_error_dataset_missing_is_unavailable() {
        let error = LibError::DatasetNotFound {
            path: "/srv/campus.db".into(),
        };
        let problem = from_lib_error(&error, "req-data");

        assert_eq!(problem.status, 503);
        assert!(problem.detail.as_deref().unwrap().contains("/srv/campus.db"));
    }

    #[test]
    fn test_from_lib_error_integrity_is_internal() {
        let error = LibError::InvalidSegmentWeight {
            segment: 3,
            weight: -1.0,
        };
        let problem = from_lib_error(&error, "req");
        assert_eq!(problem.type_uri, PROBLEM_INTERNAL_ERROR);
        assert_eq!(problem.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
