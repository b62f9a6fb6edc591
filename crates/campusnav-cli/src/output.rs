//! Output formatting for route and waypoint rendering.
//!
//! This module provides formatters for rendering route summaries and
//! waypoint listings in the formats selectable with `--format`.

use std::io::{self, Write};

use clap::ValueEnum;

use campusnav_lib::{RouteRenderMode, RouteStep, RouteSummary, Waypoint};

use crate::terminal::{supports_color, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per step.
    #[default]
    Text,
    /// Markdown-flavoured listing grouped by floor.
    Rich,
    /// Colored tags for start, floor changes and goal.
    Enhanced,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Whether the logo and footer decorations belong in this format.
    pub fn is_decorated(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}

/// Print the CLI logo banner.
///
/// Respects `NO_COLOR` and `TERM=dumb`.
pub fn print_logo() {
    use crate::terminal::{colors, supports_unicode};

    let (orange, cyan, reset) = if supports_color() {
        (colors::ORANGE, colors::CYAN, colors::RESET)
    } else {
        ("", "", "")
    };

    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────────╮{reset}
{cyan}│{orange}   C A M P U S N A V   ◉ kiosk    {cyan}│{reset}
{cyan}╰──────────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{orange}+----------------------------------+
|  CAMPUSNAV  >> kiosk wayfinding  |
+----------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    use crate::terminal::colors;

    let (gray, reset) = if supports_color() {
        (colors::GRAY, colors::RESET)
    } else {
        ("", "")
    };

    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{gray}Completed in {}{reset}", time_str);
}

/// Render a route summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Rich => print!("{}", summary.render(RouteRenderMode::RichText)),
        OutputFormat::Enhanced => {
            let renderer = EnhancedRenderer::new(ColorPalette::detect());
            print!("{}", renderer.render(summary));
        }
        OutputFormat::Json => write_json(summary)?,
    }
    Ok(())
}

/// Render a waypoint listing in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_waypoints(waypoints: &[Waypoint], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(&waypoints),
        _ => {
            print!("{}", waypoint_table(waypoints));
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Tabulate waypoints as `floor  code  name (kind)` lines.
pub fn waypoint_table(waypoints: &[Waypoint]) -> String {
    let width = waypoints
        .iter()
        .map(|waypoint| waypoint.code.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for waypoint in waypoints {
        let marker = if waypoint.accessible { "" } else { " [not accessible]" };
        out.push_str(&format!(
            "{:>3}  {:<width$}  {} ({}){}\n",
            waypoint.floor,
            waypoint.code,
            waypoint.name,
            waypoint.kind,
            marker,
            width = width
        ));
    }
    out.push_str(&format!("{} waypoints\n", waypoints.len()));
    out
}

/// Renderer for enhanced output format with colored step tags.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    /// Create a new enhanced renderer with the given color palette.
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// Render a route summary to a string.
    pub fn render(&self, summary: &RouteSummary) -> String {
        let p = &self.palette;
        let mut out = format!(
            "Route from {}{}{} to {}{}{} ({} steps):\n",
            p.white_bold,
            summary.start.name,
            p.reset,
            p.white_bold,
            summary.goal.name,
            p.reset,
            summary.hops
        );

        let len = summary.steps.len();
        let mut previous_floor = None;
        for (i, step) in summary.steps.iter().enumerate() {
            let floor_changed = previous_floor.is_some_and(|floor| floor != step.floor);
            out.push_str(&self.step_line(step, i == 0, i + 1 == len, floor_changed));
            out.push('\n');
            previous_floor = Some(step.floor);
        }

        out.push_str(&self.footer(summary));
        out
    }

    fn step_line(
        &self,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
        floor_changed: bool,
    ) -> String {
        let p = &self.palette;
        let (tag_color, tag_text) = self.step_tag(is_first, is_last, floor_changed);
        format!(
            "{}{}{} {}{}{} {}[{}]{} floor {}",
            tag_color,
            tag_text,
            p.reset,
            p.white_bold,
            step.name,
            p.reset,
            p.gray,
            step.code,
            p.reset,
            step.floor
        )
    }

    fn step_tag(&self, is_first: bool, is_last: bool, floor_changed: bool) -> (&str, &str) {
        let p = &self.palette;
        if is_first {
            (p.tag_start, " STRT ")
        } else if is_last {
            (p.tag_goal, " GOAL ")
        } else if floor_changed {
            (p.tag_floor, " FLOR ")
        } else {
            (p.tag_walk, " WALK ")
        }
    }

    fn footer(&self, summary: &RouteSummary) -> String {
        let p = &self.palette;
        format!(
            "\n{}───────────────────────────────────────{}\n  {}Total Distance:{} {}{:.1}{}\n  {}Floor Changes:{}  {}{}{}\n",
            p.gray,
            p.reset,
            p.cyan,
            p.reset,
            p.white_bold,
            summary.total_distance,
            p.reset,
            p.green,
            p.reset,
            p.white_bold,
            summary.floor_changes,
            p.reset
        )
    }
}
