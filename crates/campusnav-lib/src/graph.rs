use std::collections::HashMap;

use crate::campus::{Segment, WaypointId};

/// Directed edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: WaypointId,
    pub weight: f64,
}

/// Which segments may contribute edges to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessibilityFilter {
    /// Every segment is usable.
    #[default]
    Any,
    /// Only segments flagged wheelchair-accessible are usable.
    AccessibleOnly,
}

impl AccessibilityFilter {
    /// Build the filter from a request's `only_accessible` flag.
    pub fn from_flag(only_accessible: bool) -> Self {
        if only_accessible {
            AccessibilityFilter::AccessibleOnly
        } else {
            AccessibilityFilter::Any
        }
    }

    fn allows(self, segment: &Segment) -> bool {
        match self {
            AccessibilityFilter::Any => true,
            AccessibilityFilter::AccessibleOnly => segment.accessible,
        }
    }
}

/// Adjacency structure used by the shortest-path engine.
///
/// Built fresh for every route computation and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    filter: AccessibilityFilter,
    adjacency: HashMap<WaypointId, Vec<Edge>>,
}

impl Graph {
    /// Filter that produced this graph.
    pub fn filter(&self) -> AccessibilityFilter {
        self.filter
    }

    /// Return the outgoing edges for a given waypoint.
    ///
    /// Waypoints without qualifying segments yield an empty slice.
    pub fn neighbours(&self, waypoint: WaypointId) -> &[Edge] {
        self.adjacency
            .get(&waypoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of directed edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Construct a graph from precomputed adjacency.
    pub fn from_parts(
        filter: AccessibilityFilter,
        adjacency: HashMap<WaypointId, Vec<Edge>>,
    ) -> Self {
        Self { filter, adjacency }
    }
}

/// Build the routing graph from all segments.
///
/// A segment rejected by `filter` contributes no edge in either direction.
/// Bidirectional segments produce two directed edges of equal weight.
pub fn build_graph<'a, I>(segments: I, filter: AccessibilityFilter) -> Graph
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut adjacency: HashMap<WaypointId, Vec<Edge>> = HashMap::new();
    for segment in segments {
        if !filter.allows(segment) {
            continue;
        }

        adjacency.entry(segment.origin).or_default().push(Edge {
            target: segment.destination,
            weight: segment.weight,
        });
        if segment.bidirectional {
            adjacency.entry(segment.destination).or_default().push(Edge {
                target: segment.origin,
                weight: segment.weight,
            });
        }
    }

    Graph { filter, adjacency }
}
