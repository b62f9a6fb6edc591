//! Waypoint listing command handler.

use std::path::Path;

use anyhow::{Context, Result};

use campusnav_lib::{ensure_dataset, list_waypoints, SqliteStore};

use campusnav_cli::output::{render_waypoints, OutputFormat};

/// Handle the waypoints subcommand.
pub fn handle_waypoints_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    floor: Option<i32>,
) -> Result<()> {
    let dataset = ensure_dataset(target_path).context("failed to locate the campus dataset")?;
    let store = SqliteStore::open(&dataset)
        .with_context(|| format!("failed to open dataset {}", dataset.display()))?;

    let waypoints = list_waypoints(&store, floor)?;
    tracing::debug!(count = waypoints.len(), ?floor, "listed waypoints");
    render_waypoints(&waypoints, format)?;
    Ok(())
}
