//! Catalog-wide summary statistics.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MenuItem;

/// A top-rated entry in a [`CatalogSummary`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatedItem {
    /// Identifier of the rated item.
    pub id: String,
    /// Display name of the rated item.
    pub name: String,
    /// Mean of the item's valid ratings.
    pub avg_rating: f64,
}

/// Aggregate statistics for a catalog.
///
/// Price statistics only consider items with a finite price. `avg_price` is
/// `0.0` and the bounds are `None` when no such item exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogSummary {
    /// Number of items in the catalog.
    pub total_meals: usize,
    /// Mean price.
    pub avg_price: f64,
    /// Cheapest price.
    pub min_price: Option<f64>,
    /// Most expensive price.
    pub max_price: Option<f64>,
    /// Highest mean ratings first; unrated items are left out.
    pub top_rated: Vec<RatedItem>,
    /// Occurrences of each lowercase flavour token.
    pub flavor_counts: BTreeMap<String, usize>,
}

/// Errors returned by [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// `top_n` was zero.
    #[error("top_n must be at least 1")]
    InvalidTopN,
}

/// Summarise `catalog`, listing up to `top_n` top-rated items.
///
/// Items tie-break on catalog order. Flavour counts use the same comma and
/// whitespace split as preference learning, restricted to the `flavor` field.
///
/// # Errors
/// Returns [`AnalyticsError::InvalidTopN`] when `top_n` is zero.
///
/// # Examples
/// ```
/// use mealwise_core::analyze;
///
/// let summary = analyze(&[], 3).expect("top_n is positive");
/// assert_eq!(summary.total_meals, 0);
/// assert_eq!(summary.avg_price, 0.0);
/// assert!(summary.min_price.is_none());
/// ```
pub fn analyze(catalog: &[MenuItem], top_n: usize) -> Result<CatalogSummary, AnalyticsError> {
    if top_n == 0 {
        return Err(AnalyticsError::InvalidTopN);
    }

    let prices: Vec<f64> = catalog
        .iter()
        .map(|item| item.price)
        .filter(|price| price.is_finite())
        .collect();

    let mut rated: Vec<RatedItem> = catalog
        .iter()
        .filter(|item| item.has_ratings())
        .map(|item| RatedItem {
            id: item.id.clone(),
            name: item.name.clone(),
            avg_rating: item.average_rating(),
        })
        .collect();
    rated.sort_by(|left, right| right.avg_rating.total_cmp(&left.avg_rating));
    rated.truncate(top_n);

    let mut flavor_counts: BTreeMap<String, usize> = BTreeMap::new();
    for token in catalog.iter().flat_map(MenuItem::flavor_tokens) {
        *flavor_counts.entry(token).or_default() += 1;
    }

    Ok(CatalogSummary {
        total_meals: catalog.len(),
        avg_price: mean(&prices),
        min_price: prices.iter().copied().reduce(f64::min),
        max_price: prices.iter().copied().reduce(f64::max),
        top_rated: rated,
        flavor_counts,
    })
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "mean price divides the sum by the item count"
)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
