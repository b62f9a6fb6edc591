//! Data provider abstraction consumed by the route engine.
//!
//! The engine only ever reads through [`CampusStore`]; it never writes. Two
//! providers ship with the library:
//!
//! - [`SqliteStore`](crate::db::SqliteStore) reads the on-disk dataset.
//! - [`MemoryStore`] serves an in-memory [`Campus`] snapshot, which is what
//!   tests and JSON-backed deployments use.

use std::sync::Arc;

use crate::campus::{Building, Campus, Segment, Waypoint};
use crate::error::Result;

/// Read-only access to campus waypoints and segments.
///
/// Implementations must be `Send + Sync` so a single provider can be shared by
/// concurrent HTTP handlers. Every call returns a fresh snapshot.
pub trait CampusStore: Send + Sync {
    /// Fetch every waypoint.
    fn waypoints(&self) -> Result<Vec<Waypoint>>;

    /// Fetch every segment.
    fn segments(&self) -> Result<Vec<Segment>>;

    /// Fetch a single waypoint by its unique code.
    fn waypoint_by_code(&self, code: &str) -> Result<Option<Waypoint>>;

    /// Fetch every building.
    fn buildings(&self) -> Result<Vec<Building>>;

    /// Fetch the waypoints located on `floor`.
    fn waypoints_on_floor(&self, floor: i32) -> Result<Vec<Waypoint>> {
        Ok(self
            .waypoints()?
            .into_iter()
            .filter(|waypoint| waypoint.floor == floor)
            .collect())
    }
}

/// Campus provider backed by an immutable in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    campus: Arc<Campus>,
}

impl MemoryStore {
    /// Wrap a campus after checking its data-integrity invariants.
    pub fn new(campus: Campus) -> Result<Self> {
        campus.validate()?;
        Ok(Self {
            campus: Arc::new(campus),
        })
    }

    /// Access the underlying snapshot.
    pub fn campus(&self) -> &Campus {
        &self.campus
    }
}

impl CampusStore for MemoryStore {
    fn waypoints(&self) -> Result<Vec<Waypoint>> {
        Ok(self.campus.waypoints.clone())
    }

    fn segments(&self) -> Result<Vec<Segment>> {
        Ok(self.campus.segments.clone())
    }

    fn waypoint_by_code(&self, code: &str) -> Result<Option<Waypoint>> {
        Ok(self.campus.waypoint_by_code(code).cloned())
    }

    fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.campus.buildings.clone())
    }
}

impl<S: CampusStore + ?Sized> CampusStore for Arc<S> {
    fn waypoints(&self) -> Result<Vec<Waypoint>> {
        (**self).waypoints()
    }

    fn segments(&self) -> Result<Vec<Segment>> {
        (**self).segments()
    }

    fn waypoint_by_code(&self, code: &str) -> Result<Option<Waypoint>> {
        (**self).waypoint_by_code(code)
    }

    fn buildings(&self) -> Result<Vec<Building>> {
        (**self).buildings()
    }

    fn waypoints_on_floor(&self, floor: i32) -> Result<Vec<Waypoint>> {
        (**self).waypoints_on_floor(floor)
    }
}
