use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::campus::WaypointId;
use crate::graph::Graph;

/// Distances and predecessors produced by a single Dijkstra run.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    distances: HashMap<WaypointId, f64>,
    predecessors: HashMap<WaypointId, WaypointId>,
}

impl SearchResult {
    /// Minimal cost from the origin, or `None` if the waypoint was never finalized.
    pub fn distance(&self, waypoint: WaypointId) -> Option<f64> {
        self.distances.get(&waypoint).copied()
    }

    /// Waypoint immediately before `waypoint` on its minimal path.
    pub fn predecessor(&self, waypoint: WaypointId) -> Option<WaypointId> {
        self.predecessors.get(&waypoint).copied()
    }

    /// All finalized waypoints and their minimal costs.
    pub fn distances(&self) -> &HashMap<WaypointId, f64> {
        &self.distances
    }

    /// Predecessor map; the origin and unreached waypoints have no entry.
    pub fn predecessors(&self) -> &HashMap<WaypointId, WaypointId> {
        &self.predecessors
    }

    /// Number of finalized waypoints.
    pub fn settled_count(&self) -> usize {
        self.distances.len()
    }
}

/// Run Dijkstra's algorithm from `origin`, stopping as soon as `target` is finalized.
///
/// `known` lists every waypoint identifier in the campus; each starts at an
/// infinite tentative distance. Edge weights must be non-negative. Unreachable
/// targets are not an error here: they simply never appear in the result.
pub fn dijkstra<I>(graph: &Graph, origin: WaypointId, target: WaypointId, known: I) -> SearchResult
where
    I: IntoIterator<Item = WaypointId>,
{
    let mut tentative: HashMap<WaypointId, f64> =
        known.into_iter().map(|id| (id, f64::INFINITY)).collect();
    let mut predecessors: HashMap<WaypointId, WaypointId> = HashMap::new();
    let mut settled: HashSet<WaypointId> = HashSet::new();
    let mut distances: HashMap<WaypointId, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();

    tentative.insert(origin, 0.0);
    queue.push(QueueEntry::new(origin, 0.0));

    while let Some(entry) = queue.pop() {
        // Stale duplicates of already finalized waypoints.
        if !settled.insert(entry.node) {
            continue;
        }
        let current_distance = entry.cost.0;
        distances.insert(entry.node, current_distance);

        if entry.node == target {
            break;
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let next_cost = current_distance + edge.weight;
            let best = tentative.get(&next).copied().unwrap_or(f64::INFINITY);
            if next_cost < best {
                tentative.insert(next, next_cost);
                predecessors.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    predecessors.retain(|waypoint, _| settled.contains(waypoint));

    SearchResult {
        distances,
        predecessors,
    }
}

/// Walk the predecessor chain from `target` back to `origin`.
///
/// Returns `[origin]` when both ends coincide and an empty sequence when the
/// target was never reached.
pub fn reconstruct_path(
    predecessors: &HashMap<WaypointId, WaypointId>,
    origin: WaypointId,
    target: WaypointId,
) -> Vec<WaypointId> {
    if origin == target {
        return vec![origin];
    }
    if !predecessors.contains_key(&target) {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut current = target;
    while current != origin {
        match predecessors.get(&current) {
            Some(&previous) => {
                path.push(previous);
                current = previous;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: WaypointId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: WaypointId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
