//! Route planning for the campus kiosk.
//!
//! This module provides:
//! - [`RouteRequest`] - destination code plus the accessibility flag
//! - [`Route`] - the assembled result handed to callers
//! - [`plan_route`] - main entry point, running build → search → reconstruct → assemble
//! - [`assemble_route`] - maps a waypoint sequence onto plottable points
//! - [`list_waypoints`] - floor-filtered waypoint listing
//!
//! # Example
//!
//! ```ignore
//! use campusnav_lib::{plan_route, RouteRequest, SqliteStore};
//!
//! let store = SqliteStore::open("campus.db")?;
//! let route = plan_route(&store, &RouteRequest::new("sala-201", false))?;
//! println!("{} points, {} m", route.points.len(), route.total_distance);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::campus::{validate_segments, Waypoint, WaypointId};
use crate::error::{Error, Result};
use crate::graph::{build_graph, AccessibilityFilter};
use crate::path::{dijkstra, reconstruct_path, SearchResult};
use crate::store::CampusStore;

/// Code of the waypoint where the kiosk stands. Every route starts here unless
/// a caller explicitly opts into another origin.
pub const KIOSK_CODE: &str = "kiosk";

/// Minimum Jaro-Winkler similarity for a code to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Maximum number of suggestions attached to an unknown-waypoint error.
const MAX_SUGGESTIONS: usize = 3;

/// Where a route starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOrigin {
    /// The reserved kiosk waypoint. A missing kiosk is a configuration defect.
    Kiosk(String),
    /// Any waypoint chosen by the caller. A missing code is a lookup failure.
    Waypoint(String),
}

impl RouteOrigin {
    /// Code of the origin waypoint.
    pub fn code(&self) -> &str {
        match self {
            RouteOrigin::Kiosk(code) | RouteOrigin::Waypoint(code) => code,
        }
    }
}

impl Default for RouteOrigin {
    fn default() -> Self {
        RouteOrigin::Kiosk(KIOSK_CODE.to_string())
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: RouteOrigin,
    pub destination_code: String,
    pub only_accessible: bool,
}

impl RouteRequest {
    /// Route from the kiosk to `destination_code`.
    pub fn new(destination_code: impl Into<String>, only_accessible: bool) -> Self {
        Self {
            origin: RouteOrigin::default(),
            destination_code: destination_code.into(),
            only_accessible,
        }
    }

    /// Route between two arbitrary waypoints.
    pub fn from_origin(
        origin_code: impl Into<String>,
        destination_code: impl Into<String>,
        only_accessible: bool,
    ) -> Self {
        Self {
            origin: RouteOrigin::Waypoint(origin_code.into()),
            destination_code: destination_code.into(),
            only_accessible,
        }
    }

    /// Replace the reserved kiosk code, e.g. with a deployment override.
    pub fn with_kiosk_code(mut self, code: impl Into<String>) -> Self {
        self.origin = RouteOrigin::Kiosk(code.into());
        self
    }

    fn filter(&self) -> AccessibilityFilter {
        AccessibilityFilter::from_flag(self.only_accessible)
    }
}

/// Plottable point on a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePoint {
    pub x_percent: f64,
    pub y_percent: f64,
    pub floor: i32,
}

impl From<&Waypoint> for RoutePoint {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            x_percent: waypoint.position.x_percent,
            y_percent: waypoint.position.y_percent,
            floor: waypoint.floor,
        }
    }
}

/// Route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Request-scoped identifier; it carries no meaning beyond one response.
    pub route_id: String,
    pub points: Vec<RoutePoint>,
    pub total_distance: f64,
    /// Waypoints behind `points`, in the same order.
    #[serde(skip)]
    pub path: Vec<WaypointId>,
}

impl Route {
    /// Number of segments walked.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute the cheapest walk for `request` against a fresh snapshot of `store`.
pub fn plan_route<S>(store: &S, request: &RouteRequest) -> Result<Route>
where
    S: CampusStore + ?Sized,
{
    let origin = resolve_origin(store, &request.origin)?;
    let destination = resolve_waypoint(store, &request.destination_code)?;

    let waypoints = store.waypoints()?;
    let segments = store.segments()?;
    let waypoint_ids: HashSet<WaypointId> = waypoints.iter().map(|w| w.id).collect();
    validate_segments(&segments, &waypoint_ids)?;

    let graph = build_graph(&segments, request.filter());
    debug!(
        waypoints = waypoints.len(),
        segments = segments.len(),
        edges = graph.edge_count(),
        only_accessible = request.only_accessible,
        "built routing graph"
    );

    let search = dijkstra(
        &graph,
        origin.id,
        destination.id,
        waypoints.iter().map(|waypoint| waypoint.id),
    );
    let path = reconstruct_path(search.predecessors(), origin.id, destination.id);

    assemble_route(&path, &waypoints, &search, &origin, &destination)
}

/// Turn a reconstructed waypoint sequence into a [`Route`].
///
/// Identifiers without a stored waypoint are skipped. An empty sequence means
/// the destination was unreachable and yields [`Error::RouteNotFound`].
pub fn assemble_route(
    path: &[WaypointId],
    waypoints: &[Waypoint],
    search: &SearchResult,
    origin: &Waypoint,
    destination: &Waypoint,
) -> Result<Route> {
    if path.is_empty() {
        return Err(Error::RouteNotFound {
            origin: origin.code.clone(),
            destination: destination.code.clone(),
        });
    }

    let lookup: HashMap<WaypointId, &Waypoint> = waypoints
        .iter()
        .map(|waypoint| (waypoint.id, waypoint))
        .collect();

    let mut points = Vec::with_capacity(path.len());
    let mut kept = Vec::with_capacity(path.len());
    for id in path {
        match lookup.get(id) {
            Some(waypoint) => {
                points.push(RoutePoint::from(*waypoint));
                kept.push(*id);
            }
            None => warn!(waypoint = *id, "dropping route step without stored waypoint"),
        }
    }

    let total_distance = search.distance(destination.id).unwrap_or(0.0);
    let route = Route {
        route_id: Uuid::new_v4().to_string(),
        points,
        total_distance,
        path: kept,
    };

    debug!(
        route_id = %route.route_id,
        origin = %origin.code,
        destination = %destination.code,
        points = route.points.len(),
        total_distance,
        "assembled route"
    );
    Ok(route)
}

/// List waypoints ordered by floor then code, optionally restricted to one floor.
pub fn list_waypoints<S>(store: &S, floor: Option<i32>) -> Result<Vec<Waypoint>>
where
    S: CampusStore + ?Sized,
{
    let mut waypoints = match floor {
        Some(floor) => store.waypoints_on_floor(floor)?,
        None => store.waypoints()?,
    };
    waypoints.sort_by(|a, b| a.floor.cmp(&b.floor).then_with(|| a.code.cmp(&b.code)));
    Ok(waypoints)
}

/// Return up to `limit` waypoint codes that look like `query`, best match first.
pub fn fuzzy_waypoint_matches(waypoints: &[Waypoint], query: &str, limit: usize) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut scored: Vec<(f64, &str)> = waypoints
        .iter()
        .map(|waypoint| {
            let score = strsim::jaro_winkler(&needle, &waypoint.code.to_lowercase());
            (score, waypoint.code.as_str())
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, code)| code.to_string())
        .collect()
}

fn resolve_origin<S>(store: &S, origin: &RouteOrigin) -> Result<Waypoint>
where
    S: CampusStore + ?Sized,
{
    match origin {
        RouteOrigin::Kiosk(code) => {
            store
                .waypoint_by_code(code)?
                .ok_or_else(|| Error::OriginNotConfigured { code: code.clone() })
        }
        RouteOrigin::Waypoint(code) => resolve_waypoint(store, code),
    }
}

fn resolve_waypoint<S>(store: &S, code: &str) -> Result<Waypoint>
where
    S: CampusStore + ?Sized,
{
    if let Some(waypoint) = store.waypoint_by_code(code)? {
        return Ok(waypoint);
    }

    let suggestions = fuzzy_waypoint_matches(&store.waypoints()?, code, MAX_SUGGESTIONS);
    Err(Error::UnknownWaypoint {
        code: code.to_string(),
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::{scenario_campus, segment, WaypointBuilder};

    fn scenario_store() -> MemoryStore {
        MemoryStore::new(scenario_campus()).expect("valid campus")
    }

    #[test]
    fn scenario_a_walks_through_the_hall() {
        let route = plan_route(&scenario_store(), &RouteRequest::new("sala-201", false))
            .expect("route exists");

        assert_eq!(route.path, vec![1, 2, 3]);
        assert_eq!(route.total_distance, 13.0);
        assert_eq!(
            route.points,
            vec![
                RoutePoint {
                    x_percent: 0.0,
                    y_percent: 0.0,
                    floor: 0,
                },
                RoutePoint {
                    x_percent: 10.0,
                    y_percent: 0.0,
                    floor: 0,
                },
                RoutePoint {
                    x_percent: 20.0,
                    y_percent: 0.0,
                    floor: 1,
                },
            ]
        );
    }

    #[test]
    fn scenario_a_accessible_only_has_no_route() {
        let err = plan_route(&scenario_store(), &RouteRequest::new("sala-201", true)).unwrap_err();
        assert!(matches!(
            err,
            Error::RouteNotFound { ref origin, ref destination }
                if origin == "kiosk" && destination == "sala-201"
        ));
    }

    #[test]
    fn scenario_b_unknown_destination() {
        let err =
            plan_route(&scenario_store(), &RouteRequest::new("nonexistent", false)).unwrap_err();
        assert!(matches!(err, Error::UnknownWaypoint { ref code, .. } if code == "nonexistent"));
    }

    /// Provider that hands out whatever it holds without validating it.
    struct UncheckedStore(crate::campus::Campus);

    impl CampusStore for UncheckedStore {
        fn waypoints(&self) -> Result<Vec<Waypoint>> {
            Ok(self.0.waypoints.clone())
        }

        fn segments(&self) -> Result<Vec<crate::campus::Segment>> {
            Ok(self.0.segments.clone())
        }

        fn waypoint_by_code(&self, code: &str) -> Result<Option<Waypoint>> {
            Ok(self.0.waypoint_by_code(code).cloned())
        }

        fn buildings(&self) -> Result<Vec<crate::campus::Building>> {
            Ok(self.0.buildings.clone())
        }
    }

    #[test]
    fn dangling_segment_from_provider_is_not_tolerated() {
        let mut campus = scenario_campus();
        campus.segments.push(segment(3, 1, 42, 1.0, true, true));

        let err = plan_route(&UncheckedStore(campus), &RouteRequest::new("sala-201", false))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DanglingSegment {
                segment: 3,
                waypoint: 42
            }
        ));
    }

    #[test]
    fn negative_weight_from_provider_is_not_tolerated() {
        let mut campus = scenario_campus();
        campus.segments[1].weight = -8.0;

        let err = plan_route(&UncheckedStore(campus), &RouteRequest::new("hall", false))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSegmentWeight { segment: 2, .. }));
    }

    #[test]
    fn scenario_c_destination_is_the_kiosk() {
        let route =
            plan_route(&scenario_store(), &RouteRequest::new(KIOSK_CODE, true)).expect("route");

        assert_eq!(route.path, vec![1]);
        assert_eq!(route.points.len(), 1);
        assert_eq!(route.total_distance, 0.0);
    }

    #[test]
    fn repeated_requests_differ_only_by_identifier() {
        let store = scenario_store();
        let request = RouteRequest::new("sala-201", false);
        let first = plan_route(&store, &request).unwrap();
        let second = plan_route(&store, &request).unwrap();

        assert_eq!(first.points, second.points);
        assert_eq!(first.total_distance, second.total_distance);
        assert_ne!(first.route_id, second.route_id);
        assert!(Uuid::parse_str(&first.route_id).is_ok());
    }

    #[test]
    fn missing_kiosk_is_a_configuration_error() {
        let mut campus = scenario_campus();
        campus.waypoints[0].code = "totem".to_string();
        let store = MemoryStore::new(campus).unwrap();

        let err = plan_route(&store, &RouteRequest::new("hall", false)).unwrap_err();
        assert!(matches!(err, Error::OriginNotConfigured { ref code } if code == "kiosk"));
    }

    #[test]
    fn overridden_kiosk_code_is_used() {
        let mut campus = scenario_campus();
        campus.waypoints[0].code = "totem".to_string();
        let store = MemoryStore::new(campus).unwrap();

        let request = RouteRequest::new("hall", false).with_kiosk_code("totem");
        let route = plan_route(&store, &request).expect("route");
        assert_eq!(route.total_distance, 5.0);
    }

    #[test]
    fn explicit_origin_routes_between_any_pair() {
        let route = plan_route(
            &scenario_store(),
            &RouteRequest::from_origin("sala-201", "kiosk", false),
        )
        .expect("route");
        assert_eq!(route.path, vec![3, 2, 1]);
        assert_eq!(route.total_distance, 13.0);
    }

    #[test]
    fn unknown_explicit_origin_is_not_a_configuration_error() {
        let err = plan_route(
            &scenario_store(),
            &RouteRequest::from_origin("lobby", "hall", false),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownWaypoint { .. }));
    }

    #[test]
    fn typo_in_destination_gets_suggestions() {
        let err = plan_route(&scenario_store(), &RouteRequest::new("sala-21", false)).unwrap_err();
        match err {
            Error::UnknownWaypoint { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("sala-201"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accessibility_filter_never_shortens_or_extends_reach() {
        // Accessible ramp 1-4-3 costs 20, stairs 1-2-3 cost 13.
        let mut campus = scenario_campus();
        campus.waypoints.push(
            WaypointBuilder::new(4, "ramp")
                .kind("corridor")
                .position(15.0, 10.0)
                .build(),
        );
        campus.segments.push(segment(3, 1, 4, 12.0, true, true));
        campus.segments.push(segment(4, 4, 3, 8.0, true, true));
        let store = MemoryStore::new(campus).unwrap();

        let open = plan_route(&store, &RouteRequest::new("sala-201", false)).unwrap();
        let filtered = plan_route(&store, &RouteRequest::new("sala-201", true)).unwrap();

        assert_eq!(open.total_distance, 13.0);
        assert_eq!(filtered.total_distance, 20.0);
        assert_eq!(filtered.path, vec![1, 4, 3]);
        assert!(filtered.total_distance >= open.total_distance);
    }

    #[test]
    fn assembler_drops_unknown_waypoints() {
        let campus = scenario_campus();
        let graph = build_graph(&campus.segments, AccessibilityFilter::Any);
        let search = dijkstra(&graph, 1, 3, [1, 2, 3]);

        let route = assemble_route(
            &[1, 42, 3],
            &campus.waypoints,
            &search,
            &campus.waypoints[0],
            &campus.waypoints[2],
        )
        .expect("non-empty path");

        assert_eq!(route.path, vec![1, 3]);
        assert_eq!(route.points.len(), 2);
        assert_eq!(route.total_distance, 13.0);
    }

    #[test]
    fn assembler_rejects_empty_path() {
        let campus = scenario_campus();
        let err = assemble_route(
            &[],
            &campus.waypoints,
            &SearchResult::default(),
            &campus.waypoints[0],
            &campus.waypoints[2],
        )
        .unwrap_err();
        assert!(matches!(err, Error::RouteNotFound { .. }));
    }

    #[test]
    fn route_serializes_with_camel_case_fields() {
        let route = plan_route(&scenario_store(), &RouteRequest::new("hall", false)).unwrap();
        let json = serde_json::to_value(&route).unwrap();

        assert!(json.get("routeId").is_some());
        assert_eq!(json["totalDistance"], 5.0);
        assert_eq!(json["points"][1]["xPercent"], 10.0);
        assert!(json.get("path").is_none());
    }

    #[test]
    fn waypoints_are_listed_by_floor_then_code() {
        let store = scenario_store();
        let all: Vec<_> = list_waypoints(&store, None)
            .unwrap()
            .into_iter()
            .map(|w| w.code)
            .collect();
        assert_eq!(all, vec!["hall", "kiosk", "sala-201"]);

        let upstairs = list_waypoints(&store, Some(1)).unwrap();
        assert_eq!(upstairs.len(), 1);
        assert!(list_waypoints(&store, Some(7)).unwrap().is_empty());
    }

    #[test]
    fn fuzzy_matches_respect_limit() {
        let campus = scenario_campus();
        assert!(fuzzy_waypoint_matches(&campus.waypoints, "zzzzzz", 3).is_empty());
        assert_eq!(fuzzy_waypoint_matches(&campus.waypoints, "hal", 1), vec!["hall"]);
    }
}
