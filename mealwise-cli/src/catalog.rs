//! Input path checks and catalog loading.

use camino::Utf8Path;
use log::warn;
use mealwise_catalog::{Menu, load_menu, read_menu_csv};

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match mealwise_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a catalog from a `.csv` menu or a JSON document.
///
/// Broken CSV rows are logged and skipped so a partly valid menu still loads.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Menu, CliError> {
    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Ok(load_menu(path)?);
    }
    let import = read_menu_csv(path).map_err(|source| CliError::ImportCsv {
        path: path.to_path_buf(),
        source,
    })?;
    if !import.errors.is_empty() {
        warn!(
            "skipped {} invalid rows while loading {path}",
            import.errors.len()
        );
    }
    Ok(import.menu)
}
