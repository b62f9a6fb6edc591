use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

use crate::campus::{Waypoint, WaypointId};
use crate::error::{Error, Result};
use crate::routing::Route;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: WaypointId,
    pub code: String,
    pub name: String,
    pub floor: i32,
}

/// Step taken while walking a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    pub index: usize,
    pub id: WaypointId,
    pub code: String,
    pub name: String,
    pub kind: String,
    pub floor: i32,
    pub x_percent: f64,
    pub y_percent: f64,
}

impl RouteStep {
    fn from_waypoint(index: usize, waypoint: &Waypoint) -> Self {
        Self {
            index,
            id: waypoint.id,
            code: waypoint.code.clone(),
            name: waypoint.name.clone(),
            kind: waypoint.kind.clone(),
            floor: waypoint.floor,
            x_percent: waypoint.position.x_percent,
            y_percent: waypoint.position.y_percent,
        }
    }

    fn endpoint(&self) -> RouteEndpoint {
        RouteEndpoint {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            floor: self.floor,
        }
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub route_id: String,
    pub hops: usize,
    pub floor_changes: usize,
    pub total_distance: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved waypoint names.
    pub fn from_route(route: &Route, waypoints: &[Waypoint]) -> Result<Self> {
        let lookup: HashMap<WaypointId, &Waypoint> = waypoints
            .iter()
            .map(|waypoint| (waypoint.id, waypoint))
            .collect();

        let steps = route
            .path
            .iter()
            .filter_map(|id| lookup.get(id))
            .enumerate()
            .map(|(index, waypoint)| RouteStep::from_waypoint(index, waypoint))
            .collect::<Vec<_>>();

        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoute);
        };
        let start = first.endpoint();
        let goal = last.endpoint();

        let floor_changes = steps
            .windows(2)
            .filter(|pair| pair[0].floor != pair[1].floor)
            .count();

        Ok(Self {
            route_id: route.route_id.clone(),
            hops: steps.len() - 1,
            floor_changes,
            total_distance: route.total_distance,
            start,
            goal,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    /// Render the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} steps, {} floor changes, distance {:.1})",
            self.start.name,
            self.goal.name,
            self.hops,
            self.floor_changes,
            self.total_distance
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} [{}] floor {} ({:.1}%, {:.1}%)",
                step.index, step.name, step.code, step.floor, step.x_percent, step.y_percent
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} steps, distance `{:.1}`)",
            self.start.name, self.goal.name, self.hops, self.total_distance
        );
        let mut floor = None;
        for step in &self.steps {
            if floor != Some(step.floor) {
                let _ = writeln!(buffer, "* Floor {}", step.floor);
                floor = Some(step.floor);
            }
            let _ = writeln!(
                buffer,
                "  * {:>2}. **{}** (`{}`, {})",
                step.index, step.name, step.code, step.kind
            );
        }
        buffer
    }
}
