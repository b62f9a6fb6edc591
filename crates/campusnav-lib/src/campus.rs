//! Campus data model: waypoints, segments and buildings.
//!
//! These records are what a [`CampusStore`](crate::store::CampusStore) hands to
//! the route engine. The engine never mutates them; it builds its own
//! per-request structures from a fresh snapshot.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a waypoint.
pub type WaypointId = i64;

/// Numeric identifier for a building.
pub type BuildingId = i64;

/// Numeric identifier for a segment.
pub type SegmentId = i64;

/// Position on a floor plan, expressed as percentages of the plan image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPosition {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl PlanPosition {
    /// Whether both coordinates fall inside the 0-100 plan range.
    pub fn is_within_plan(&self) -> bool {
        (0.0..=100.0).contains(&self.x_percent) && (0.0..=100.0).contains(&self.y_percent)
    }
}

/// A navigable point in the campus graph (room, corridor, stair, elevator, kiosk).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: WaypointId,
    pub code: String,
    pub name: String,
    /// Open category tag such as `room`, `corridor`, `stair` or `elevator`.
    pub kind: String,
    /// Floor index, 0 is the ground floor.
    pub floor: i32,
    #[serde(flatten)]
    pub position: PlanPosition,
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Building used for grouping only; routing ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<BuildingId>,
}

/// A weighted connection between two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: SegmentId,
    pub origin: WaypointId,
    pub destination: WaypointId,
    pub weight: f64,
    pub bidirectional: bool,
    pub accessible: bool,
}

/// Building grouping for waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: BuildingId,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Complete snapshot of the campus data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Campus {
    /// Lookup a waypoint by its case-sensitive code.
    pub fn waypoint_by_code(&self, code: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|waypoint| waypoint.code == code)
    }

    /// Lookup a waypoint by identifier.
    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|waypoint| waypoint.id == id)
    }

    /// Check the data-integrity invariants the route engine relies on.
    ///
    /// Codes must be unique, segments must reference existing waypoints with a
    /// finite non-negative weight, building references must resolve, and
    /// coordinates must stay within the plan.
    pub fn validate(&self) -> Result<()> {
        let mut building_codes = HashSet::new();
        let mut building_ids = HashSet::new();
        for building in &self.buildings {
            if !building_codes.insert(building.code.as_str()) {
                return Err(Error::DuplicateBuildingCode {
                    code: building.code.clone(),
                });
            }
            building_ids.insert(building.id);
        }

        let mut codes = HashSet::new();
        let mut ids = HashSet::new();
        for waypoint in &self.waypoints {
            if !codes.insert(waypoint.code.as_str()) {
                return Err(Error::DuplicateWaypointCode {
                    code: waypoint.code.clone(),
                });
            }
            if !waypoint.position.is_within_plan() {
                return Err(Error::CoordinateOutOfRange {
                    code: waypoint.code.clone(),
                    x_percent: waypoint.position.x_percent,
                    y_percent: waypoint.position.y_percent,
                });
            }
            if let Some(building) = waypoint.building {
                if !building_ids.contains(&building) {
                    return Err(Error::UnknownBuilding {
                        code: waypoint.code.clone(),
                        building: building.to_string(),
                    });
                }
            }
            if !ids.insert(waypoint.id) {
                return Err(Error::DuplicateWaypointId { id: waypoint.id });
            }
        }

        validate_segments(&self.segments, &ids)
    }
}

/// Check that every segment has a usable weight and joins two known waypoints.
///
/// Runs on every routing snapshot as well as on import, so a provider that
/// skips its own checks cannot feed the search a dangling or negative edge.
pub fn validate_segments(segments: &[Segment], waypoint_ids: &HashSet<WaypointId>) -> Result<()> {
    for segment in segments {
        validate_weight(segment)?;
        for endpoint in [segment.origin, segment.destination] {
            if !waypoint_ids.contains(&endpoint) {
                return Err(Error::DanglingSegment {
                    segment: segment.id,
                    waypoint: endpoint,
                });
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_weight(segment: &Segment) -> Result<()> {
    if !segment.weight.is_finite() || segment.weight < 0.0 {
        return Err(Error::InvalidSegmentWeight {
            segment: segment.id,
            weight: segment.weight,
        });
    }
    Ok(())
}

/// Hand-authored campus description where segments refer to waypoint codes.
///
/// This is the format accepted by `campusnav-cli import`. Identifiers are
/// assigned in document order starting at 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusDocument {
    #[serde(default)]
    pub buildings: Vec<BuildingEntry>,
    pub waypoints: Vec<WaypointEntry>,
    #[serde(default)]
    pub segments: Vec<SegmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointEntry {
    pub code: String,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub floor: i32,
    pub x_percent: f64,
    pub y_percent: f64,
    #[serde(default = "default_true")]
    pub accessible: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Building code, resolved against `buildings`.
    #[serde(default)]
    pub building: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEntry {
    pub from: String,
    pub to: String,
    pub weight: f64,
    #[serde(default = "default_true")]
    pub bidirectional: bool,
    #[serde(default = "default_true")]
    pub accessible: bool,
}

fn default_true() -> bool {
    true
}

impl CampusDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve codes to identifiers and validate the resulting campus.
    pub fn into_campus(self) -> Result<Campus> {
        let mut building_ids: HashMap<String, BuildingId> = HashMap::new();
        let mut buildings = Vec::with_capacity(self.buildings.len());
        for (index, entry) in self.buildings.into_iter().enumerate() {
            let id = index as BuildingId + 1;
            if building_ids.insert(entry.code.clone(), id).is_some() {
                return Err(Error::DuplicateBuildingCode { code: entry.code });
            }
            buildings.push(Building {
                id,
                code: entry.code,
                name: entry.name,
                description: entry.description,
            });
        }

        let mut waypoint_ids: HashMap<String, WaypointId> = HashMap::new();
        let mut waypoints = Vec::with_capacity(self.waypoints.len());
        for (index, entry) in self.waypoints.into_iter().enumerate() {
            let id = index as WaypointId + 1;
            if waypoint_ids.insert(entry.code.clone(), id).is_some() {
                return Err(Error::DuplicateWaypointCode { code: entry.code });
            }
            let building = match entry.building {
                Some(code) => Some(*building_ids.get(&code).ok_or_else(|| {
                    Error::UnknownBuilding {
                        code: entry.code.clone(),
                        building: code.clone(),
                    }
                })?),
                None => None,
            };
            waypoints.push(Waypoint {
                id,
                code: entry.code,
                name: entry.name,
                kind: entry.kind,
                floor: entry.floor,
                position: PlanPosition {
                    x_percent: entry.x_percent,
                    y_percent: entry.y_percent,
                },
                accessible: entry.accessible,
                description: entry.description,
                building,
            });
        }

        let resolve = |code: &str| {
            waypoint_ids
                .get(code)
                .copied()
                .ok_or_else(|| Error::DanglingSegmentCode {
                    code: code.to_string(),
                })
        };

        let mut segments = Vec::with_capacity(self.segments.len());
        for (index, entry) in self.segments.iter().enumerate() {
            segments.push(Segment {
                id: index as SegmentId + 1,
                origin: resolve(&entry.from)?,
                destination: resolve(&entry.to)?,
                weight: entry.weight,
                bidirectional: entry.bidirectional,
                accessible: entry.accessible,
            });
        }

        let campus = Campus {
            buildings,
            waypoints,
            segments,
        };
        campus.validate()?;
        Ok(campus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{scenario_campus, WaypointBuilder};

    #[test]
    fn scenario_campus_is_valid() {
        scenario_campus().validate().expect("valid campus");
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut campus = scenario_campus();
        campus
            .waypoints
            .push(WaypointBuilder::new(99, "hall").build());
        let err = campus.validate().unwrap_err();
        assert!(matches!(err, Error::DuplicateWaypointCode { code } if code == "hall"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut campus = scenario_campus();
        campus
            .waypoints
            .push(WaypointBuilder::new(1, "annex").build());
        let err = campus.validate().unwrap_err();
        assert!(matches!(err, Error::DuplicateWaypointId { id: 1 }));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut campus = scenario_campus();
        campus.segments[0].weight = -1.0;
        assert!(matches!(
            campus.validate(),
            Err(Error::InvalidSegmentWeight { segment: 1, .. })
        ));
    }

    #[test]
    fn nan_weight_is_rejected() {
        let mut campus = scenario_campus();
        campus.segments[1].weight = f64::NAN;
        assert!(matches!(
            campus.validate(),
            Err(Error::InvalidSegmentWeight { segment: 2, .. })
        ));
    }

    #[test]
    fn dangling_segment_is_rejected() {
        let mut campus = scenario_campus();
        campus.segments[0].destination = 42;
        assert!(matches!(
            campus.validate(),
            Err(Error::DanglingSegment {
                segment: 1,
                waypoint: 42
            })
        ));
    }

    #[test]
    fn coordinates_outside_plan_are_rejected() {
        let mut campus = scenario_campus();
        campus.waypoints[0].position.x_percent = 100.5;
        assert!(matches!(
            campus.validate(),
            Err(Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn document_resolves_codes_in_order() {
        let json = r#"{
            "buildings": [{ "code": "A", "name": "Bloco A" }],
            "waypoints": [
                { "code": "kiosk", "name": "Kiosk", "kind": "kiosk", "xPercent": 0, "yPercent": 0, "building": "A" },
                { "code": "hall", "name": "Hall", "kind": "corridor", "xPercent": 10, "yPercent": 0 }
            ],
            "segments": [{ "from": "kiosk", "to": "hall", "weight": 5 }]
        }"#;

        let campus = CampusDocument::from_json(json)
            .and_then(CampusDocument::into_campus)
            .expect("document converts");

        assert_eq!(campus.waypoints[0].id, 1);
        assert_eq!(campus.waypoints[0].building, Some(1));
        assert_eq!(campus.waypoints[1].id, 2);
        let segment = &campus.segments[0];
        assert_eq!((segment.origin, segment.destination), (1, 2));
        assert!(segment.bidirectional);
        assert!(segment.accessible);
    }

    #[test]
    fn document_with_unknown_segment_code_fails() {
        let json = r#"{
            "waypoints": [
                { "code": "kiosk", "name": "Kiosk", "kind": "kiosk", "xPercent": 0, "yPercent": 0 }
            ],
            "segments": [{ "from": "kiosk", "to": "ghost", "weight": 1 }]
        }"#;

        let err = CampusDocument::from_json(json)
            .and_then(CampusDocument::into_campus)
            .unwrap_err();
        assert!(matches!(err, Error::DanglingSegmentCode { code } if code == "ghost"));
    }

    #[test]
    fn waypoint_serializes_flat_percent_coordinates() {
        let waypoint = WaypointBuilder::new(1, "kiosk").position(12.5, 40.0).build();
        let json = serde_json::to_value(&waypoint).unwrap();
        assert_eq!(json["xPercent"], 12.5);
        assert_eq!(json["yPercent"], 40.0);
        assert!(json.get("building").is_none());
    }
}
