//! Route command handler for walking directions from the kiosk.

use std::path::Path;

use anyhow::{Context, Result};

use campusnav_lib::{
    ensure_dataset, load_campus, plan_route, Error as RouteError, MemoryStore, RouteOrigin,
    RouteRequest, RouteSummary,
};

use campusnav_cli::output::{render_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Destination waypoint code.
    pub to: String,
    /// Explicit starting waypoint; the kiosk when absent.
    pub from: Option<String>,
    /// Kiosk waypoint code used when `from` is absent.
    pub kiosk_code: String,
    /// Only use wheelchair-accessible segments.
    pub accessible: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let origin = match &self.from {
            Some(code) => RouteOrigin::Waypoint(code.clone()),
            None => RouteOrigin::Kiosk(self.kiosk_code.clone()),
        };
        RouteRequest {
            origin,
            destination_code: self.to.clone(),
            only_accessible: self.accessible,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let dataset = ensure_dataset(target_path).context("failed to locate the campus dataset")?;
    let campus = load_campus(&dataset)
        .with_context(|| format!("failed to open dataset {}", dataset.display()))?;
    let snapshot = MemoryStore::new(campus)?;

    let request = args.to_request();
    let summary = summarize_route(&snapshot, &request)
        .map_err(|err| format_route_error(&request, err))?;
    render_route(&summary, format)?;
    Ok(())
}

/// Plan and summarize against one snapshot so the steps describe the same
/// data the search ran on.
fn summarize_route(
    snapshot: &MemoryStore,
    request: &RouteRequest,
) -> Result<RouteSummary, RouteError> {
    let route = plan_route(snapshot, request)?;
    RouteSummary::from_route(&route, &snapshot.campus().waypoints)
}

fn format_route_error(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::RouteNotFound {
            origin,
            destination,
        } => {
            let hint = if request.only_accessible {
                "Some segments were excluded by --accessible; try again without it."
            } else {
                "The destination is not connected to the walkable network."
            };
            anyhow::anyhow!("No route found between {origin} and {destination}. {hint}")
        }
        RouteError::OriginNotConfigured { code } => anyhow::anyhow!(
            "The dataset has no waypoint with code '{code}'. Pass --from or fix the kiosk code."
        ),
        other => other.into(),
    }
}
