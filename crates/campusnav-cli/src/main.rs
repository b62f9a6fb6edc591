mod commands;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::output::{print_footer, print_logo, OutputFormat};
use campusnav_lib::{DATA_PATH_ENV, KIOSK_CODE};

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus kiosk wayfinding utilities")]
struct Cli {
    /// Override the dataset directory or file path.
    #[arg(long, global = true, env = DATA_PATH_ENV)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Waypoint code of the kiosk that routes start from.
    #[arg(long, global = true, env = "CAMPUSNAV_ORIGIN_CODE", default_value = KIOSK_CODE)]
    kiosk_code: String,

    /// Suppress the banner and timing footer.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute walking directions to a waypoint.
    Route {
        /// Destination waypoint code.
        #[arg(long = "to")]
        to: String,
        /// Start somewhere other than the kiosk.
        #[arg(long = "from")]
        from: Option<String>,
        /// Only use wheelchair-accessible segments.
        #[arg(long)]
        accessible: bool,
    },
    /// List waypoints ordered by floor and code.
    Waypoints {
        /// Only list waypoints on this floor.
        #[arg(long, allow_negative_numbers = true)]
        floor: Option<i32>,
    },
    /// Load the dataset and check its integrity rules.
    Validate,
    /// Create the dataset from a JSON campus document.
    Import {
        /// JSON document whose segments reference waypoint codes.
        #[arg(long)]
        input: PathBuf,
        /// Replace an existing dataset.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();
    let decorated = cli.format.is_decorated() && !cli.no_logo;

    if decorated {
        print_logo();
    }

    let data = cli.data.as_deref();
    match &cli.command {
        Command::Route {
            to,
            from,
            accessible,
        } => {
            let args = RouteCommandArgs {
                to: to.clone(),
                from: from.clone(),
                kiosk_code: cli.kiosk_code.clone(),
                accessible: *accessible,
            };
            commands::route::handle_route_command(data, cli.format, &args)?;
        }
        Command::Waypoints { floor } => {
            commands::waypoints::handle_waypoints_command(data, cli.format, *floor)?;
        }
        Command::Validate => {
            commands::validate::handle_validate_command(data, cli.format, &cli.kiosk_code)?;
        }
        Command::Import { input, force } => {
            commands::import::handle_import_command(data, input, *force)?;
        }
    }

    if decorated {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
