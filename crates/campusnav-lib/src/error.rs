use std::path::PathBuf;

use thiserror::Error;

use crate::campus::WaypointId;

/// Convenient result alias for the campusnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when an import would overwrite an existing dataset.
    #[error("refusing to overwrite existing dataset at {path}")]
    DatasetExists { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the campus dataset")]
    ProjectDirsUnavailable,

    /// Raised when attempting to load a schema that is not supported.
    #[error("unsupported dataset schema; expected nodes/edges tables")]
    UnsupportedSchema,

    /// The reserved origin waypoint is missing from the data source.
    #[error("origin waypoint '{code}' is not configured in the campus data")]
    OriginNotConfigured { code: String },

    /// Raised when a waypoint code could not be found in the dataset.
    #[error("unknown waypoint code: {code}{}", format_suggestions(.suggestions))]
    UnknownWaypoint {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when no qualifying path connects the two waypoints.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Raised when a summary is requested for a route with no steps.
    #[error("route contains no waypoints")]
    EmptyRoute,

    /// Two waypoints share the same code.
    #[error("duplicate waypoint code encountered: {code}")]
    DuplicateWaypointCode { code: String },

    /// Two waypoints share the same identifier.
    #[error("duplicate waypoint id encountered: {id}")]
    DuplicateWaypointId { id: WaypointId },

    /// Two buildings share the same code.
    #[error("duplicate building code encountered: {code}")]
    DuplicateBuildingCode { code: String },

    /// A segment references a waypoint that does not exist.
    #[error("segment {segment} references unknown waypoint {waypoint}")]
    DanglingSegment {
        segment: i64,
        waypoint: WaypointId,
    },

    /// A segment endpoint in an import document names an unknown waypoint code.
    #[error("segment endpoint references unknown waypoint code '{code}'")]
    DanglingSegmentCode { code: String },

    /// A waypoint references a building that does not exist.
    #[error("waypoint '{code}' references unknown building {building}")]
    UnknownBuilding { code: String, building: String },

    /// Segment weight is negative or not a finite number.
    #[error("segment {segment} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidSegmentWeight { segment: i64, weight: f64 },

    /// Waypoint coordinates fall outside of the 0-100 percent plan range.
    #[error("waypoint '{code}' has coordinates ({x_percent}, {y_percent}) outside 0-100")]
    CoordinateOutOfRange {
        code: String,
        x_percent: f64,
        y_percent: f64,
    },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short machine-friendly label used for failure metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::OriginNotConfigured { .. } => "origin_not_configured",
            Error::UnknownWaypoint { .. } => "unknown_waypoint",
            Error::RouteNotFound { .. } => "no_route",
            Error::DatasetNotFound { .. } => "dataset_not_found",
            Error::DuplicateWaypointCode { .. }
            | Error::DuplicateWaypointId { .. }
            | Error::DuplicateBuildingCode { .. }
            | Error::DanglingSegment { .. }
            | Error::DanglingSegmentCode { .. }
            | Error::UnknownBuilding { .. }
            | Error::InvalidSegmentWeight { .. }
            | Error::CoordinateOutOfRange { .. } => "data_integrity",
            _ => "internal_error",
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
