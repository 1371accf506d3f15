//! JSON persistence for menus and sessions.
//!
//! Documents are written as pretty-printed JSON via an atomic rename, and
//! every load re-checks the invariants the in-memory types guarantee.

use camino::Utf8Path;
use mealwise_core::MenuItem;
use serde::{Deserialize, Serialize};

use crate::{Menu, PersistError, UserSession};

#[derive(Deserialize)]
struct MenuDocument {
    items: Vec<MenuItem>,
}

/// Write `menu` to `path`, creating parent directories.
///
/// # Errors
/// Returns [`PersistError`] when encoding or writing fails.
pub fn save_menu(path: &Utf8Path, menu: &Menu) -> Result<(), PersistError> {
    write_json(path, menu)
}

/// Load a menu written by [`save_menu`].
///
/// # Errors
/// Returns [`PersistError::InvalidMenu`] when an item is invalid or ids
/// repeat, and other variants for I/O or JSON failures.
pub fn load_menu(path: &Utf8Path) -> Result<Menu, PersistError> {
    let document: MenuDocument = read_json(path)?;
    Menu::from_items(document.items).map_err(|source| PersistError::InvalidMenu {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `session` to `path`, creating parent directories.
///
/// # Errors
/// Returns [`PersistError`] when encoding or writing fails.
pub fn save_session(path: &Utf8Path, session: &UserSession) -> Result<(), PersistError> {
    write_json(path, session)
}

/// Load a session written by [`save_session`].
///
/// # Errors
/// Returns [`PersistError::InvalidSession`] when the stored budget is invalid,
/// and other variants for I/O or JSON failures.
pub fn load_session(path: &Utf8Path) -> Result<UserSession, PersistError> {
    let session: UserSession = read_json(path)?;
    session
        .validate()
        .map_err(|source| PersistError::InvalidSession {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(session)
}

fn write_json<T: Serialize>(path: &Utf8Path, value: &T) -> Result<(), PersistError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    mealwise_fs::write_atomically(path, &bytes).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Utf8Path) -> Result<T, PersistError> {
    let text = mealwise_fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}
