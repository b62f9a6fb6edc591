//! Success envelope mirroring [`crate::ProblemDetails`].
//!
//! Both outcomes carry their media type in the body, so kiosk clients can
//! branch on a single field without reading headers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Media type reported by every successful response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Payload `T` serialized at the top level plus a `content_type` field.
///
/// ```
/// use campusnav_service_shared::ServiceResponse;
///
/// #[derive(serde::Serialize)]
/// struct FloorCount {
///     floor: i32,
///     waypoints: usize,
/// }
///
/// let body = serde_json::to_value(ServiceResponse::new(FloorCount { floor: 1, waypoints: 5 })).unwrap();
/// assert_eq!(body["waypoints"], 5);
/// assert_eq!(body["content_type"], "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }

    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
