// Test utilities used across `campusnav-cli` tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use campusnav_lib::{PlanPosition, RouteEndpoint, RouteStep, RouteSummary, Waypoint};

fn step(index: usize, id: i64, code: &str, name: &str, kind: &str, floor: i32) -> RouteStep {
    RouteStep {
        index,
        id,
        code: code.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        floor,
        x_percent: 10.0 * (index as f64 + 1.0),
        y_percent: 50.0,
    }
}

fn endpoint(step: &RouteStep) -> RouteEndpoint {
    RouteEndpoint {
        id: step.id,
        code: step.code.clone(),
        name: step.name.clone(),
        floor: step.floor,
    }
}

/// Three-step route kiosk -> hall -> sala-201 climbing one floor.
pub fn sample_summary() -> RouteSummary {
    let steps = vec![
        step(0, 1, "kiosk", "Totem", "kiosk", 0),
        step(1, 2, "hall", "Hall", "corridor", 0),
        step(2, 3, "sala-201", "Sala 201", "room", 1),
    ];
    RouteSummary {
        route_id: "00000000-0000-4000-8000-000000000000".to_string(),
        hops: 2,
        floor_changes: 1,
        total_distance: 13.0,
        start: endpoint(&steps[0]),
        goal: endpoint(&steps[2]),
        steps,
    }
}

/// Kiosk plus one inaccessible upstairs room.
pub fn sample_waypoints() -> Vec<Waypoint> {
    let waypoint = |id, code: &str, name: &str, kind: &str, floor, accessible| Waypoint {
        id,
        code: code.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        floor,
        position: PlanPosition {
            x_percent: 10.0,
            y_percent: 10.0,
        },
        accessible,
        description: None,
        building: None,
    };
    vec![
        waypoint(1, "kiosk", "Totem", "kiosk", 0, true),
        waypoint(2, "sala-201", "Sala 201", "room", 1, false),
    ]
}
