// Test-only helpers for `campusnav-lib` unit tests
#![allow(dead_code)]
use crate::campus::{Campus, PlanPosition, Segment, Waypoint, WaypointId};

/// Builder to create `Waypoint` instances in tests with sensible defaults.
pub struct WaypointBuilder {
    waypoint: Waypoint,
}

impl WaypointBuilder {
    #[must_use]
    pub fn new(id: WaypointId, code: &str) -> Self {
        Self {
            waypoint: Waypoint {
                id,
                code: code.to_string(),
                name: code.to_string(),
                kind: "room".to_string(),
                floor: 0,
                position: PlanPosition {
                    x_percent: 0.0,
                    y_percent: 0.0,
                },
                accessible: true,
                description: None,
                building: None,
            },
        }
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.waypoint.kind = kind.to_string();
        self
    }

    pub fn floor(mut self, floor: i32) -> Self {
        self.waypoint.floor = floor;
        self
    }

    pub fn position(mut self, x_percent: f64, y_percent: f64) -> Self {
        self.waypoint.position = PlanPosition {
            x_percent,
            y_percent,
        };
        self
    }

    pub fn build(self) -> Waypoint {
        self.waypoint
    }
}

pub fn segment(
    id: i64,
    origin: WaypointId,
    destination: WaypointId,
    weight: f64,
    bidirectional: bool,
    accessible: bool,
) -> Segment {
    Segment {
        id,
        origin,
        destination,
        weight,
        bidirectional,
        accessible,
    }
}

/// kiosk(1) <-5, accessible-> hall(2) <-8, stairs only-> sala-201(3, floor 1)
pub fn scenario_campus() -> Campus {
    Campus {
        buildings: Vec::new(),
        waypoints: vec![
            WaypointBuilder::new(1, "kiosk").kind("kiosk").build(),
            WaypointBuilder::new(2, "hall")
                .kind("corridor")
                .position(10.0, 0.0)
                .build(),
            WaypointBuilder::new(3, "sala-201")
                .floor(1)
                .position(20.0, 0.0)
                .build(),
        ],
        segments: vec![
            segment(1, 1, 2, 5.0, true, true),
            segment(2, 2, 3, 8.0, true, false),
        ],
    }
}
