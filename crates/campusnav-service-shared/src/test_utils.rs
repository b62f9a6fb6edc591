//! Test utilities for microservice handler testing.
//!
//! This module provides fixtures and helpers for testing HTTP handlers
//! against the sample campus in `docs/fixtures/campus.json`.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use campusnav_lib::{CampusDocument, MemoryStore, KIOSK_CODE};

use crate::state::AppState;

/// Path to the test fixture campus document.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/campus.json"
);

/// Lazily-initialized test state using the fixture campus.
static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared test AppState backed by an in-memory copy of the fixture.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let store = fixture_store();
            AppState::from_store(Arc::new(store), KIOSK_CODE)
        })
        .clone()
}

/// Load the fixture campus into a fresh [`MemoryStore`].
pub fn fixture_store() -> MemoryStore {
    let path = fixture_document_path();
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {:?}: {}", path, e));
    let campus = CampusDocument::from_json(&text)
        .and_then(CampusDocument::into_campus)
        .unwrap_or_else(|e| panic!("failed to parse fixture {:?}: {}", path, e));
    MemoryStore::new(campus).unwrap_or_else(|e| panic!("fixture {:?} is invalid: {}", path, e))
}

/// Get the absolute path to the fixture campus document.
pub fn fixture_document_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Known waypoint codes in the fixture campus.
pub mod fixture_waypoints {
    /// Reserved origin on the ground floor of building A.
    pub const KIOSK: &str = "kiosk";

    /// First-floor classroom; reached by stairs (19) or elevator (25).
    pub const SALA_201: &str = "sala-201";

    /// Ground-floor classroom next to the kiosk.
    pub const SALA_101: &str = "sala-101";

    /// Building B auditorium behind a one-way walkway.
    pub const AUDITORIO: &str = "auditorio";

    /// Storage room with no segments.
    pub const DEPOSITO: &str = "deposito";
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
