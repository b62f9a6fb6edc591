//! Dataset validation command handler.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use campusnav_lib::{ensure_dataset, load_campus, Campus};

use campusnav_cli::output::OutputFormat;

/// Counts reported after a successful validation.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub dataset: String,
    pub buildings: usize,
    pub waypoints: usize,
    pub segments: usize,
    pub kiosk_present: bool,
}

impl ValidationReport {
    fn from_campus(dataset: &Path, campus: &Campus, kiosk_code: &str) -> Self {
        Self {
            dataset: dataset.display().to_string(),
            buildings: campus.buildings.len(),
            waypoints: campus.waypoints.len(),
            segments: campus.segments.len(),
            kiosk_present: campus.waypoint_by_code(kiosk_code).is_some(),
        }
    }
}

/// Handle the validate subcommand.
///
/// Loads the whole dataset and checks its integrity rules. A missing kiosk is
/// reported as an error because no route could ever be answered.
pub fn handle_validate_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    kiosk_code: &str,
) -> Result<()> {
    let dataset = ensure_dataset(target_path).context("failed to locate the campus dataset")?;
    let campus = load_campus(&dataset)
        .with_context(|| format!("failed to load dataset from {}", dataset.display()))?;
    campus
        .validate()
        .with_context(|| format!("dataset {} failed validation", dataset.display()))?;

    let report = ValidationReport::from_campus(&dataset, &campus, kiosk_code);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!(
            "Dataset {} is valid: {} buildings, {} waypoints, {} segments",
            report.dataset, report.buildings, report.waypoints, report.segments
        ),
    }

    if !report.kiosk_present {
        anyhow::bail!("origin waypoint '{kiosk_code}' is missing from the dataset");
    }
    Ok(())
}
