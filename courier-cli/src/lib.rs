//! Command-line interface for ordering a courier's stops.
//!
//! `courier solve` reads a JSON cost matrix, runs the branch-and-bound solver
//! and prints the optimal tour as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod error;
mod fs;
mod logging;
mod solve;

pub use error::CliError;

use solve::{SolveArgs, run_solve};
#[cfg(test)]
use solve::{
    DefaultSolveSolverBuilder, SolveConfig, SolveOutput, SolveRequestFile, SolveSolverBuilder,
    config_from_layers_for_test, load_solve_request, run_solve_with,
};

pub(crate) const ARG_SOLVE_REQUEST: &str = "request";
pub(crate) const ARG_SOLVE_DEPOT: &str = "depot";
pub(crate) const ARG_SOLVE_EXPANSION_LIMIT: &str = "expansion-limit";
pub(crate) const ENV_SOLVE_REQUEST: &str = "COURIER_CMDS_SOLVE_REQUEST_PATH";

/// Run the Courier CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read, or the solve fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.log_level)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Optimal stop ordering for a single courier",
    version
)]
struct Cli {
    /// Most verbose log level written to stderr.
    #[arg(long, global = true, value_name = "level", default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a closed tour over a JSON cost matrix.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
