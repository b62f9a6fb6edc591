use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the campus dataset.
pub const DATASET_FILENAME: &str = "campus.db";

/// Environment variable overriding the dataset location.
pub const DATA_PATH_ENV: &str = "CAMPUSNAV_DATA_PATH";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "campusnav", "campusnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Work out which dataset file to use.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `CAMPUSNAV_DATA_PATH` environment variable.
/// 3. Platform-specific project data directory.
///
/// A path without an extension is treated as a directory holding
/// [`DATASET_FILENAME`]. The file is not required to exist.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATA_PATH_ENV) {
        let resolved = canonical_dataset_path(Path::new(&env_path));
        debug!(path = %resolved.display(), "using dataset from {DATA_PATH_ENV}");
        return Ok(resolved);
    }

    default_dataset_path()
}

/// Like [`resolve_dataset_path`] but fails when the file is missing.
pub fn ensure_dataset(target: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_dataset_path(target)?;
    if !path.exists() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(path)
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }

    path.join(DATASET_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_file_is_used_verbatim() {
        let path = resolve_dataset_path(Some(Path::new("/srv/data/north.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/srv/data/north.db"));
    }

    #[test]
    fn directory_gets_default_filename() {
        let path = resolve_dataset_path(Some(Path::new("/srv/data"))).unwrap();
        assert_eq!(path, PathBuf::from("/srv/data/campus.db"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("absent.db");
        assert!(matches!(
            ensure_dataset(Some(&target)),
            Err(Error::DatasetNotFound { path }) if path == target
        ));
    }

    #[test]
    fn existing_file_resolves() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("campus.db");
        std::fs::write(&target, b"").unwrap();
        assert_eq!(ensure_dataset(Some(&target)).unwrap(), target);
    }
}
