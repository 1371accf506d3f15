//! Error types for the catalog layer.

use std::io;

use camino::Utf8PathBuf;
use mealwise_core::{MenuItemError, RecommendError};
use thiserror::Error;

/// Errors returned when mutating or querying a [`Menu`](crate::Menu).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuError {
    /// An item with the same id is already on the menu.
    #[error("menu item {id} already exists")]
    DuplicateId {
        /// Conflicting identifier.
        id: String,
    },
    /// No item carries the requested id.
    #[error("menu item {id} not found")]
    UnknownId {
        /// Missing identifier.
        id: String,
    },
    /// The item failed validation.
    #[error("invalid menu item")]
    InvalidItem(#[from] MenuItemError),
    /// A price cap was negative or not a number.
    #[error("max_price must be a non-negative number, got {max_price}")]
    InvalidPriceCap {
        /// Rejected cap.
        max_price: f64,
    },
    /// A search asked for zero results.
    #[error("top_k must be at least 1")]
    InvalidTopK,
}

/// Errors raised by [`UserSession`](crate::UserSession).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The budget was below zero.
    #[error("budget must be non-negative, got {budget}")]
    NegativeBudget {
        /// Rejected budget.
        budget: f64,
    },
    /// The budget was NaN or infinite.
    #[error("budget must be a finite number")]
    NonFiniteBudget,
    /// A price passed to a budget check was negative or not finite.
    #[error("price must be a non-negative number, got {price}")]
    InvalidPrice {
        /// Rejected price.
        price: f64,
    },
    /// The recommender rejected the request.
    #[error("recommendation failed")]
    Recommend(#[from] RecommendError),
}

/// A CSV data row that could not be turned into a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {message}")]
pub struct RowError {
    /// One-based line number; the header is row 1.
    pub row: usize,
    /// Human readable reason.
    pub message: String,
}

/// Errors that abort a CSV import.
#[derive(Debug, Error)]
pub enum CsvImportError {
    /// The header lacks required columns.
    #[error("CSV missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Absent column names in canonical order.
        missing: Vec<String>,
    },
    /// The header row could not be read.
    #[error("failed to read CSV header")]
    Header {
        /// Underlying parser error.
        #[source]
        source: csv::Error,
    },
    /// The CSV file could not be read.
    #[error("failed to read menu CSV at {path}")]
    Io {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while saving or loading JSON documents.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the file failed.
    #[error("failed to access {path}")]
    Io {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The document could not be encoded or decoded.
    #[error("invalid JSON in {path}")]
    Json {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded menu violated a menu invariant.
    #[error("menu in {path} is invalid")]
    InvalidMenu {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Violated invariant.
        #[source]
        source: MenuError,
    },
    /// The decoded session violated a session invariant.
    #[error("session in {path} is invalid")]
    InvalidSession {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Violated invariant.
        #[source]
        source: SessionError,
    },
}

