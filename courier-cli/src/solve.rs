//! Solve command implementation for the Courier CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{CostMatrix, Diagnostics, Edge, SolveError, TourSolver};
use courier_solver_bnb::{BranchAndBoundConfig, BranchAndBoundSolver};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SOLVE_DEPOT, ARG_SOLVE_EXPANSION_LIMIT, ARG_SOLVE_REQUEST, CliError, ENV_SOLVE_REQUEST,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a closed tour over a JSON cost matrix. The request \
                 file holds {\"costs\": [[...], ...]}, where entry [i][j] is \
                 the cost of driving from stop i to stop j and null marks a \
                 missing road.",
    about = "Order a courier's stops optimally"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the cost matrix.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Stop the printed visit order starts from.
    #[arg(long = ARG_SOLVE_DEPOT, value_name = "stop")]
    #[serde(default)]
    pub(crate) depot: Option<usize>,
    /// Give up after this many search-tree expansions.
    #[arg(long = ARG_SOLVE_EXPANSION_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) expansion_limit: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// First stop of the printed visit order.
    pub(crate) depot: usize,
    /// Optional cap on solver expansions.
    pub(crate) expansion_limit: Option<usize>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            depot: args.depot.unwrap_or(0),
            expansion_limit: args.expansion_limit,
        })
    }
}

/// On-disk request: a square matrix where `null` marks a missing road.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct SolveRequestFile {
    pub(crate) costs: Vec<Vec<Option<f64>>>,
}

/// JSON document printed after a successful solve.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct SolveOutput {
    /// Committed edges in the order the search chose them.
    pub(crate) tour: Vec<Edge>,
    /// Total travel cost of the tour.
    pub(crate) cost: f64,
    /// Stops in driving order, starting at the depot.
    pub(crate) visit_order: Vec<usize>,
    /// Search statistics.
    pub(crate) diagnostics: Diagnostics,
}

/// Builds a solver instance for the current solve invocation.
pub(crate) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn TourSolver>, CliError>;
}

pub(crate) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn TourSolver>, CliError> {
        let solver_config = BranchAndBoundConfig {
            expansion_limit: config.expansion_limit,
            ..BranchAndBoundConfig::default()
        };
        Ok(Box::new(BranchAndBoundSolver::with_config(solver_config)))
    }
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let output = execute_solve(args, builder)?;
    write_solve_output(writer, &output)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveOutput, CliError> {
    let config = resolve_solve_config(args)?;
    let request = load_solve_request(&config.request_path)?;
    let matrix = CostMatrix::from_optional(request.costs).map_err(|source| {
        CliError::InvalidSolveRequest {
            path: config.request_path.clone(),
            source,
        }
    })?;
    if config.depot >= matrix.size() {
        return Err(CliError::DepotOutOfRange {
            depot: config.depot,
            stops: matrix.size(),
        });
    }
    log::info!(
        "solving {} stops from {}",
        matrix.size(),
        config.request_path
    );

    let solver = builder.build(&config)?;
    let response = solver
        .solve(&matrix)
        .map_err(|source| CliError::Solve { source })?;
    let visit_order =
        response
            .tour
            .visit_order(config.depot)
            .ok_or_else(|| CliError::Solve {
                source: SolveError::InternalInvariantViolation {
                    reason: format!("tour does not pass through depot {}", config.depot),
                },
            })?;
    Ok(SolveOutput {
        tour: response.tour.edges().to_vec(),
        cost: response.tour.cost(),
        visit_order,
        diagnostics: response.diagnostics,
    })
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SolveRequestFile`] from disk.
pub(crate) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequestFile, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_output(writer: &mut dyn Write, output: &SolveOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerializeSolveResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
