//! Analyze command implementation for the Mealwise CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, require_existing};
use crate::output::write_json;
use crate::{ARG_ANALYZE_CATALOG, ARG_ANALYZE_TOP_N, CliError, ENV_ANALYZE_CATALOG};

/// Number of top-rated meals listed when `--top-n` is absent.
pub(crate) const DEFAULT_TOP_N: usize = 3;

/// CLI arguments for the `analyze` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise a JSON or CSV catalog: meal count, price range \
                 and mean, the best rated meals and how often each flavour \
                 appears.",
    about = "Print catalog statistics as JSON"
)]
#[ortho_config(prefix = "MEALWISE")]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON catalog or menu CSV.
    #[arg(long = ARG_ANALYZE_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// How many top-rated meals to list.
    #[arg(long = ARG_ANALYZE_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
}

impl AnalyzeArgs {
    pub(crate) fn into_config(self) -> Result<AnalyzeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyzeConfig::try_from(merged)
    }
}

/// Resolved `analyze` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnalyzeConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) top_n: usize,
}

impl TryFrom<AnalyzeArgs> for AnalyzeConfig {
    type Error = CliError;

    fn try_from(args: AnalyzeArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_ANALYZE_CATALOG,
            env: ENV_ANALYZE_CATALOG,
        })?;
        Ok(Self {
            catalog,
            top_n: args.top_n.unwrap_or(DEFAULT_TOP_N),
        })
    }
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_analyze_with(args, &mut stdout)
}

pub(crate) fn run_analyze_with(args: AnalyzeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog, ARG_ANALYZE_CATALOG)?;
    let menu = load_catalog(&config.catalog)?;
    let summary = menu.analytics(config.top_n)?;
    write_json(writer, &summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AnalyzeConfig, CliError> {
    let merged = AnalyzeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AnalyzeConfig::try_from(merged)
}
