//! Error types emitted by the Courier CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::{CostMatrixError, SolveError};
use thiserror::Error;

/// Errors emitted by the Courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Installing the stderr logger failed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[from] log::SetLoggerError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it as an argument or set {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the option holding the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the solve request file failed.
    #[error("failed to open solve request at {path:?}: {source}")]
    OpenSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Solve request JSON could not be decoded.
    #[error("failed to parse solve request JSON at {path:?}: {source}")]
    ParseSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The request's costs do not form a valid matrix.
    #[error("solve request in {path:?} is not a valid cost matrix: {source}")]
    InvalidSolveRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CostMatrixError,
    },
    /// The requested depot is not one of the stops.
    #[error("depot {depot} is out of range for {stops} stops")]
    DepotOutOfRange {
        /// Requested depot index.
        depot: usize,
        /// Number of stops in the request.
        stops: usize,
    },
    /// The solver rejected the request.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        source: SolveError,
    },
    /// Serializing the solve response failed.
    #[error("failed to serialize solve response: {0}")]
    SerializeSolveResponse(#[source] serde_json::Error),
    /// Writing the solve output failed.
    #[error("failed to write solve output: {0}")]
    WriteSolveOutput(#[source] std::io::Error),
}
