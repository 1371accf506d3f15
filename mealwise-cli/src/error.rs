//! Error types emitted by the Mealwise CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mealwise_catalog::{CsvImportError, PersistError};
use mealwise_core::{AnalyticsError, RecommendError, StrategyParseError};
use thiserror::Error;

/// Errors emitted by the Mealwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path is missing or is not a regular file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Importing a CSV menu failed outright.
    #[error("failed to import menu CSV {path:?}: {source}")]
    ImportCsv {
        /// CSV path.
        path: Utf8PathBuf,
        /// Import failure.
        #[source]
        source: CsvImportError,
    },
    /// Reading or writing a JSON document failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The strategy name is not recognised.
    #[error(transparent)]
    InvalidStrategy(#[from] StrategyParseError),
    /// The recommender rejected the request.
    #[error("recommendation failed: {0}")]
    Recommend(#[from] RecommendError),
    /// The analytics request was invalid.
    #[error("analysis failed: {0}")]
    Analyze(#[from] AnalyticsError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
