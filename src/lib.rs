//! Facade crate for the Mealwise recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the catalog,
//! session and persistence layer behind the `catalog` feature.

#![forbid(unsafe_code)]

pub use mealwise_core::{
    AnalyticsError, CatalogSummary, DEFAULT_TOP_K, MealKind, MenuItem, MenuItemError,
    PreferenceProfile, RatedItem, RecommendError, RecommendRequest, Recommender, RelevanceScorer,
    Scorer, Strategy, StrategyParseError, analyze, learn, recommend, score,
};

#[cfg(feature = "catalog")]
pub use mealwise_catalog::{
    CsvImportError, Menu, MenuError, MenuImport, PersistError, RowError, SessionError,
    UserSession, load_menu, load_session, parse_menu_csv, read_menu_csv, save_menu, save_session,
};
