//! Command-line interface for the Mealwise recommendation engine.
//!
//! Three subcommands share one layered configuration scheme: flags win over
//! `MEALWISE_CMDS_<COMMAND>_<FIELD>` environment variables, which win over
//! configuration files discovered by `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod analyze;
mod catalog;
mod error;
mod import;
mod output;
mod recommend;

pub use error::CliError;

use analyze::AnalyzeArgs;
use import::ImportArgs;
use recommend::RecommendArgs;

const ARG_IMPORT_CSV: &str = "csv";
const ARG_IMPORT_OUTPUT: &str = "output";
const ENV_IMPORT_CSV: &str = "MEALWISE_CMDS_IMPORT_CSV";
const ENV_IMPORT_OUTPUT: &str = "MEALWISE_CMDS_IMPORT_OUTPUT";

const ARG_RECOMMEND_CATALOG: &str = "catalog";
const ARG_RECOMMEND_SESSION: &str = "session";
const ARG_RECOMMEND_HISTORY: &str = "history";
const ARG_RECOMMEND_BUDGET: &str = "budget";
const ARG_RECOMMEND_TOP_K: &str = "top-k";
const ARG_RECOMMEND_STRATEGY: &str = "strategy";
const ARG_RECOMMEND_SEED: &str = "seed";
const ENV_RECOMMEND_CATALOG: &str = "MEALWISE_CMDS_RECOMMEND_CATALOG";

const ARG_ANALYZE_CATALOG: &str = "catalog";
const ARG_ANALYZE_TOP_N: &str = "top-n";
const ENV_ANALYZE_CATALOG: &str = "MEALWISE_CMDS_ANALYZE_CATALOG";

/// Run the Mealwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Import(args) => import::run_import(args),
        Command::Recommend(args) => recommend::run_recommend(args),
        Command::Analyze(args) => analyze::run_analyze(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mealwise",
    about = "Learn taste profiles and recommend meals from a menu catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a menu CSV into a JSON catalog.
    Import(ImportArgs),
    /// Recommend meals for an order history.
    Recommend(RecommendArgs),
    /// Summarise a catalog.
    Analyze(AnalyzeArgs),
}

#[cfg(test)]
mod tests;
