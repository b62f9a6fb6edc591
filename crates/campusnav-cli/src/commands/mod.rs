// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod import;
pub mod route;
pub mod validate;
pub mod waypoints;
