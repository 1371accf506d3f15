//! Import command implementation for the Mealwise CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use mealwise_catalog::{read_menu_csv, save_menu};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::require_existing;
use crate::output::write_json;
use crate::{ARG_IMPORT_CSV, ARG_IMPORT_OUTPUT, CliError, ENV_IMPORT_CSV, ENV_IMPORT_OUTPUT};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a menu CSV, skip rows that do not describe a valid \
                 meal, and write the remaining items as a JSON catalog. A \
                 summary of imported and skipped rows is printed as JSON.",
    about = "Convert a menu CSV into a JSON catalog"
)]
#[ortho_config(prefix = "MEALWISE")]
pub(crate) struct ImportArgs {
    /// Path to the menu CSV file.
    #[arg(long = ARG_IMPORT_CSV, value_name = "path")]
    #[serde(default)]
    pub(crate) csv: Option<Utf8PathBuf>,
    /// Destination for the JSON catalog.
    #[arg(long = ARG_IMPORT_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ImportArgs {
    pub(crate) fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) csv: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let csv = args.csv.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_CSV,
            env: ENV_IMPORT_CSV,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_OUTPUT,
            env: ENV_IMPORT_OUTPUT,
        })?;
        Ok(Self { csv, output })
    }
}

#[derive(Debug, Serialize)]
struct ImportReport<'a> {
    output: &'a Utf8Path,
    imported: usize,
    skipped: Vec<SkippedRow<'a>>,
}

#[derive(Debug, Serialize)]
struct SkippedRow<'a> {
    row: usize,
    message: &'a str,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_import_with(args, &mut stdout)
}

pub(crate) fn run_import_with(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.csv, ARG_IMPORT_CSV)?;

    let import = read_menu_csv(&config.csv).map_err(|source| CliError::ImportCsv {
        path: config.csv.clone(),
        source,
    })?;
    save_menu(&config.output, &import.menu)?;
    info!(
        "imported {} meals from {} into {}",
        import.menu.len(),
        config.csv,
        config.output
    );

    let report = ImportReport {
        output: &config.output,
        imported: import.menu.len(),
        skipped: import
            .errors
            .iter()
            .map(|error| SkippedRow {
                row: error.row,
                message: &error.message,
            })
            .collect(),
    };
    write_json(writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ImportConfig, CliError> {
    let merged = ImportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ImportConfig::try_from(merged)
}
