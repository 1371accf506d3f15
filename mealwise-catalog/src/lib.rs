//! Menu management, import and persistence for the Mealwise engine.
//!
//! Responsibilities:
//! - Own a mutable, id-unique [`Menu`] and a per-user [`UserSession`].
//! - Import menus from CSV and persist menus and sessions as JSON.
//! - Delegate learning, scoring, ranking and analytics to `mealwise-core`.
//!
//! Boundaries:
//! - Do not encode ranking rules (they live in `mealwise-core`).
//! - Keep all file access behind `mealwise-fs`.

#![forbid(unsafe_code)]

mod error;
mod import;
mod menu;
mod persist;
mod session;

pub use error::{CsvImportError, MenuError, PersistError, RowError, SessionError};
pub use import::{MenuImport, REQUIRED_COLUMNS, parse_menu_csv, read_menu_csv};
pub use menu::Menu;
pub use persist::{load_menu, load_session, save_menu, save_session};
pub use session::UserSession;
