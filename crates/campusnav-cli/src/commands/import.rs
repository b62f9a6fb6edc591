//! Import command handler: build the SQLite dataset from a JSON campus document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use campusnav_lib::{resolve_dataset_path, write_campus, CampusDocument};

/// Handle the import subcommand.
pub fn handle_import_command(target_path: Option<&Path>, input: &Path, force: bool) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read campus document {}", input.display()))?;
    let campus = CampusDocument::from_json(&text)
        .and_then(CampusDocument::into_campus)
        .with_context(|| format!("invalid campus document {}", input.display()))?;

    let dataset = resolve_dataset_path(target_path)?;
    write_campus(&dataset, &campus, force)
        .with_context(|| format!("failed to write dataset {}", dataset.display()))?;

    println!(
        "Imported {} waypoints and {} segments into {}",
        campus.waypoints.len(),
        campus.segments.len(),
        dataset.display()
    );
    Ok(())
}
