mod common;

use campusnav_lib::{
    plan_route, CampusStore, Error, RouteRequest, SqliteStore, WaypointId, KIOSK_CODE,
};

use common::{fixture_sqlite, fixture_store};

fn codes<S: CampusStore>(store: &S, path: &[WaypointId]) -> Vec<String> {
    let waypoints = store.waypoints().expect("waypoints");
    path.iter()
        .map(|id| {
            waypoints
                .iter()
                .find(|w| w.id == *id)
                .map(|w| w.code.clone())
                .expect("path waypoint exists")
        })
        .collect()
}

#[test]
fn stairs_are_preferred_when_unrestricted() {
    let store = fixture_store();
    let route = plan_route(&store, &RouteRequest::new("sala-201", false)).expect("route exists");

    assert_eq!(route.total_distance, 19.0);
    assert_eq!(
        codes(&store, &route.path),
        vec!["kiosk", "hall-a", "stairs-a-0", "stairs-a-1", "hall-a-1", "sala-201"]
    );
}

#[test]
fn accessible_route_takes_the_elevator() {
    let store = fixture_store();
    let route = plan_route(&store, &RouteRequest::new("sala-201", true)).expect("route exists");

    assert_eq!(route.total_distance, 25.0);
    assert_eq!(
        codes(&store, &route.path),
        vec!["kiosk", "hall-a", "elevator-a-0", "elevator-a-1", "hall-a-1", "sala-201"]
    );
}

#[test]
fn points_match_stored_waypoints() {
    let store = fixture_store();
    let route = plan_route(&store, &RouteRequest::new("lab-202", false)).expect("route exists");
    let waypoints = store.waypoints().unwrap();

    assert_eq!(route.points.len(), route.path.len());
    for (point, id) in route.points.iter().zip(&route.path) {
        let waypoint = waypoints.iter().find(|w| w.id == *id).unwrap();
        assert_eq!(point.x_percent, waypoint.position.x_percent);
        assert_eq!(point.y_percent, waypoint.position.y_percent);
        assert_eq!(point.floor, waypoint.floor);
    }
    assert_eq!(route.points.first().map(|p| p.floor), Some(0));
    assert_eq!(route.points.last().map(|p| p.floor), Some(1));
}

#[test]
fn one_way_exit_only_shortens_the_return_trip() {
    let store = fixture_store();
    let there = plan_route(&store, &RouteRequest::new("auditorio", false)).unwrap();
    let back = plan_route(
        &store,
        &RouteRequest::from_origin("auditorio", KIOSK_CODE, false),
    )
    .unwrap();

    assert_eq!(there.total_distance, 26.0);
    assert_eq!(back.total_distance, 19.0);
    assert_eq!(
        codes(&store, &back.path),
        vec!["auditorio", "walkway", "hall-a", "kiosk"]
    );
}

#[test]
fn isolated_room_has_no_route() {
    let err = plan_route(&fixture_store(), &RouteRequest::new("deposito", false)).unwrap_err();
    assert!(matches!(err, Error::RouteNotFound { .. }));
}

#[test]
fn accessibility_filter_never_reduces_distances() {
    let store = fixture_store();
    for waypoint in store.waypoints().unwrap() {
        let open = plan_route(&store, &RouteRequest::new(&waypoint.code, false));
        let filtered = plan_route(&store, &RouteRequest::new(&waypoint.code, true));

        match (open, filtered) {
            (Ok(open), Ok(filtered)) => assert!(
                filtered.total_distance >= open.total_distance,
                "{} got shorter under the filter",
                waypoint.code
            ),
            (Err(_), Ok(_)) => panic!("{} only reachable with the filter", waypoint.code),
            _ => {}
        }
    }
}

#[test]
fn sqlite_and_memory_stores_agree() {
    let memory = fixture_store();
    let (_dir, sqlite): (_, SqliteStore) = fixture_sqlite();

    for destination in ["sala-101", "sala-201", "auditorio"] {
        for only_accessible in [false, true] {
            let request = RouteRequest::new(destination, only_accessible);
            let a = plan_route(&memory, &request).expect("memory route");
            let b = plan_route(&sqlite, &request).expect("sqlite route");
            assert_eq!(a.points, b.points, "{destination} ({only_accessible})");
            assert_eq!(a.total_distance, b.total_distance);
        }
    }
}
