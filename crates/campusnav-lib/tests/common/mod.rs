//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests,
//! including the checked-in campus document and scratch SQLite datasets.

use std::path::PathBuf;

use campusnav_lib::{write_campus, Campus, CampusDocument, MemoryStore, SqliteStore};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the checked-in campus document.
pub fn fixture_document_path() -> PathBuf {
    fixtures_dir().join("campus.json")
}

/// Load and resolve the fixture campus.
pub fn fixture_campus() -> Campus {
    let text = std::fs::read_to_string(fixture_document_path()).expect("read campus.json");
    CampusDocument::from_json(&text)
        .and_then(CampusDocument::into_campus)
        .expect("fixture campus is valid")
}

/// In-memory store over the fixture campus.
#[allow(dead_code)]
pub fn fixture_store() -> MemoryStore {
    MemoryStore::new(fixture_campus()).expect("fixture campus is valid")
}

/// Scratch SQLite dataset holding the fixture campus.
///
/// The dataset lives as long as the returned [`TempDir`].
#[allow(dead_code)]
pub fn fixture_sqlite() -> (TempDir, SqliteStore) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("campus.db");
    write_campus(&path, &fixture_campus(), false).expect("write fixture dataset");
    let store = SqliteStore::open(&path).expect("open fixture dataset");
    (dir, store)
}
