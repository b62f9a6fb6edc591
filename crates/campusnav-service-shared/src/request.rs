//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Longest waypoint code accepted from a client.
pub const MAX_CODE_LENGTH: usize = 64;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for a route from the kiosk to a destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Code of the destination waypoint.
    pub destination_code: String,

    /// Restrict the route to wheelchair-accessible segments.
    #[serde(default)]
    pub only_accessible: bool,
}

impl RouteRequest {
    /// Build the library request starting at the configured kiosk code.
    pub fn to_lib(&self, kiosk_code: &str) -> campusnav_lib::RouteRequest {
        campusnav_lib::RouteRequest::new(self.destination_code.trim(), self.only_accessible)
            .with_kiosk_code(kiosk_code)
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let code = self.destination_code.trim();
        if code.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'destinationCode' field is required and cannot be empty",
                request_id,
            )));
        }

        if code.len() > MAX_CODE_LENGTH {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'destinationCode' field cannot exceed {MAX_CODE_LENGTH} characters"),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Query parameters for the waypoint listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypointQuery {
    /// Restrict the listing to a single floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_request_valid() {
        let req = RouteRequest {
            destination_code: "sala-201".to_string(),
            only_accessible: true,
        };
        assert!(req.validate("test").is_ok());
    }

    #[test]
    fn test_route_request_blank_destination() {
        let req = RouteRequest {
            destination_code: "   ".to_string(),
            only_accessible: false,
        };
        let err = req.validate("test").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("'destinationCode'"));
    }

    #[test]
    fn test_route_request_overlong_destination() {
        let req = RouteRequest {
            destination_code: "x".repeat(MAX_CODE_LENGTH + 1),
            only_accessible: false,
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("exceed"));
    }

    #[test]
    fn test_route_request_deserialization_defaults() {
        let json = r#"{"destinationCode":"sala-201"}"#;
        let req: RouteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.destination_code, "sala-201");
        assert!(!req.only_accessible);
    }

    #[test]
    fn test_route_request_uses_kiosk_override() {
        let req = RouteRequest {
            destination_code: " sala-201 ".to_string(),
            only_accessible: true,
        };
        let lib = req.to_lib("totem");
        assert_eq!(lib.origin.code(), "totem");
        assert_eq!(lib.destination_code, "sala-201");
        assert!(lib.only_accessible);
    }

    #[test]
    fn test_waypoint_query_floor_is_optional() {
        let empty: WaypointQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.floor.is_none());
        let upstairs: WaypointQuery = serde_json::from_str(r#"{"floor":1}"#).unwrap();
        assert_eq!(upstairs.floor, Some(1));
    }
}
