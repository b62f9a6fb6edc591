//! Campus wayfinding library entry points.
//!
//! This crate exposes helpers to locate the campus dataset, read waypoints and
//! segments through a [`CampusStore`], build the routing graph, and run the
//! shortest-path search from the kiosk. Higher-level consumers (CLI, HTTP
//! service) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod campus;
pub mod dataset;
pub mod db;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use campus::{
    validate_segments, Building, BuildingId, Campus, CampusDocument, PlanPosition, Segment,
    SegmentId, Waypoint, WaypointId,
};
pub use dataset::{default_dataset_path, ensure_dataset, resolve_dataset_path, DATA_PATH_ENV};
pub use db::{load_campus, write_campus, SqliteStore};
pub use error::{Error, Result};
pub use graph::{build_graph, AccessibilityFilter, Edge, Graph};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{dijkstra, reconstruct_path, SearchResult};
pub use routing::{
    assemble_route, fuzzy_waypoint_matches, list_waypoints, plan_route, Route, RouteOrigin,
    RoutePoint, RouteRequest, KIOSK_CODE,
};
pub use store::{CampusStore, MemoryStore};
