//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the campus data provider and the configured kiosk code.

use std::path::Path;
use std::sync::Arc;

use campusnav_lib::{CampusStore, Error as LibError, SqliteStore, KIOSK_CODE};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open the campus dataset.
    DatasetLoad(LibError),

    /// Database file not found.
    DatabaseNotFound(String),

    /// The dataset has no waypoint carrying the kiosk code.
    OriginMissing(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetLoad(e) => write!(f, "failed to load campus dataset: {}", e),
            Self::DatabaseNotFound(path) => write!(f, "database not found: {}", path),
            Self::OriginMissing(code) => {
                write!(f, "origin waypoint '{}' not present in dataset", code)
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::DatasetLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use campusnav_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let waypoints = state.store().waypoints();
///     // ... use waypoints
/// }
///
/// let state = AppState::load("path/to/campus.db", "kiosk").unwrap();
/// let app = Router::new()
///     .route("/api/v1/waypoints", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CampusStore>,
    kiosk_code: String,
}

impl AppState {
    /// Open the SQLite dataset at `db_path` and check the kiosk is present.
    ///
    /// The store reads the file on every request, so edits made by campus
    /// administrators are visible without a restart.
    pub fn load(db_path: impl AsRef<Path>, kiosk_code: &str) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        if !db_path.exists() {
            return Err(AppStateError::DatabaseNotFound(
                db_path.display().to_string(),
            ));
        }

        tracing::info!(path = %db_path.display(), "opening campus dataset");
        let store = SqliteStore::open(db_path)?;

        if store.waypoint_by_code(kiosk_code)?.is_none() {
            return Err(AppStateError::OriginMissing(kiosk_code.to_string()));
        }

        let waypoint_count = store.waypoints()?.len();
        tracing::info!(
            waypoint_count,
            kiosk = kiosk_code,
            "campus dataset ready"
        );

        Ok(Self::from_store(Arc::new(store), kiosk_code))
    }

    /// Create application state around an existing provider.
    ///
    /// This is useful for testing or when serving an in-memory snapshot.
    pub fn from_store(store: Arc<dyn CampusStore>, kiosk_code: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                kiosk_code: kiosk_code.into(),
            }),
        }
    }

    /// Access the campus data provider.
    pub fn store(&self) -> &dyn CampusStore {
        self.inner.store.as_ref()
    }

    /// Run `operation` against the store on tokio's blocking pool.
    ///
    /// Store reads may hit SQLite, so async handlers go through here instead
    /// of calling [`AppState::store`] on a runtime worker.
    pub async fn run_blocking<T, F>(&self, operation: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&dyn CampusStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.inner.store);
        tokio::task::spawn_blocking(move || operation(store.as_ref())).await
    }

    /// Code of the waypoint every route starts from.
    pub fn kiosk_code(&self) -> &str {
        &self.inner.kiosk_code
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_store(
            Arc::new(campusnav_lib::MemoryStore::default()),
            KIOSK_CODE,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("kiosk_code", &self.inner.kiosk_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusnav_lib::{Campus, MemoryStore, PlanPosition, Waypoint};

    fn single_kiosk_store() -> Arc<dyn CampusStore> {
        let campus = Campus {
            waypoints: vec![Waypoint {
                id: 1,
                code: "kiosk".to_string(),
                name: "Totem".to_string(),
                kind: "kiosk".to_string(),
                floor: 0,
                position: PlanPosition {
                    x_percent: 5.0,
                    y_percent: 5.0,
                },
                accessible: true,
                description: None,
                building: None,
            }],
            ..Campus::default()
        };
        Arc::new(MemoryStore::new(campus).unwrap())
    }

    #[test]
    fn test_app_state_from_store() {
        let state = AppState::from_store(single_kiosk_store(), "kiosk");

        assert_eq!(state.kiosk_code(), "kiosk");
        assert_eq!(state.store().waypoints().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_blocking_reads_store_off_runtime() {
        let state = AppState::from_store(single_kiosk_store(), "kiosk");

        let count = state
            .run_blocking(|store| store.waypoints().map(|w| w.len()))
            .await
            .expect("task completes")
            .expect("store answers");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_run_blocking_reports_panics() {
        let state = AppState::default();
        let outcome = state
            .run_blocking(|_| -> usize { panic!("store exploded") })
            .await;
        assert!(outcome.unwrap_err().is_panic());
    }

    #[test]
    fn test_app_state_clone_shares_store() {
        let state1 = AppState::from_store(single_kiosk_store(), "kiosk");
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.inner, &state2.inner));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::default();
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("kiosk_code"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::DatabaseNotFound("/path/to/db".to_string());
        assert!(err.to_string().contains("/path/to/db"));
        assert!(err.to_string().contains("not found"));

        let err = AppStateError::OriginMissing("totem".to_string());
        assert!(err.to_string().contains("'totem'"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/campus.db", "kiosk");

        match result.unwrap_err() {
            AppStateError::DatabaseNotFound(path) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
