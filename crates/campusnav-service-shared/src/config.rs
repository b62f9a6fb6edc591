//! Service configuration read from the environment.
//!
//! - `CAMPUSNAV_DATA_PATH`: SQLite dataset (default: platform data directory)
//! - `CAMPUSNAV_ORIGIN_CODE`: Waypoint code routes start from (default: `kiosk`)
//! - `SERVICE_PORT`: HTTP port (default: 8080)

use std::path::PathBuf;

use campusnav_lib::{resolve_dataset_path, KIOSK_CODE};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the origin waypoint code.
pub const ORIGIN_CODE_ENV: &str = "CAMPUSNAV_ORIGIN_CODE";

/// Environment variable holding the HTTP port.
pub const SERVICE_PORT_ENV: &str = "SERVICE_PORT";

/// Port used when `SERVICE_PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration shared by the campusnav services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Location of the campus dataset.
    pub data_path: PathBuf,
    /// Code of the waypoint every route starts from.
    pub origin_code: String,
    /// Port the HTTP listener binds to.
    pub port: u16,
}

impl ServiceConfig {
    /// Read the configuration from environment variables.
    ///
    /// The dataset path follows the library's resolution order (the
    /// `CAMPUSNAV_DATA_PATH` variable, then the platform data directory).
    pub fn from_env() -> campusnav_lib::Result<Self> {
        let data_path = resolve_dataset_path(None)?;
        let origin_code = std::env::var(ORIGIN_CODE_ENV).ok();
        let port = std::env::var(SERVICE_PORT_ENV).ok();

        Ok(Self::from_parts(data_path, origin_code.as_deref(), port.as_deref()))
    }

    /// Assemble a configuration from raw values, applying defaults.
    pub fn from_parts(data_path: PathBuf, origin_code: Option<&str>, port: Option<&str>) -> Self {
        let origin_code = origin_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(KIOSK_CODE)
            .to_string();

        let port = port
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_path,
            origin_code,
            port,
        }
    }
}
