//! Score menu items for a user profile and budget.
//!
//! The `Scorer` trait assigns a relevance score to a
//! [`MenuItem`](crate::MenuItem) given a [`PreferenceProfile`](crate::PreferenceProfile)
//! and an optional budget. [`RelevanceScorer`] is the engine's default.

use crate::{MenuItem, PreferenceProfile};

/// Multiplier applied to the summed token weights.
pub const TOKEN_WEIGHT: f64 = 2.0;
/// Largest bonus granted to an item priced exactly at the budget.
pub const BUDGET_BONUS: f64 = 0.5;
/// Penalty per currency unit above the budget.
pub const OVER_BUDGET_PENALTY: f64 = 0.2;

/// Calculate a relevance score for a menu item.
///
/// Higher scores indicate a better match. Scores have no fixed range and may
/// be negative. Implementations must be thread-safe (`Send` + `Sync`) and
/// infallible.
///
/// # Examples
///
/// ```rust
/// use mealwise_core::{MenuItem, PreferenceProfile, Scorer};
///
/// struct CheapFirst;
///
/// impl Scorer for CheapFirst {
///     fn score(&self, item: &MenuItem, _profile: &PreferenceProfile, _budget: Option<f64>) -> f64 {
///         -item.price
///     }
/// }
///
/// # fn main() -> Result<(), mealwise_core::MenuItemError> {
/// let item = MenuItem::new("1", "Soup", 4.0)?;
/// assert_eq!(CheapFirst.score(&item, &PreferenceProfile::new(), None), -4.0);
/// # Ok(())
/// # }
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `item` according to `profile` and `budget`.
    fn score(&self, item: &MenuItem, profile: &PreferenceProfile, budget: Option<f64>) -> f64;
}

/// Token affinity, rating quality and budget proximity combined.
///
/// `score = 2 * token_score + average_rating + budget_effect`, where the
/// token score sums profile weights over the item's distinct tokens.
#[derive(Debug, Copy, Clone, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Sum of profile weights over the item's distinct tokens.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "summing token weights")]
    pub fn token_score(item: &MenuItem, profile: &PreferenceProfile) -> f64 {
        item.token_set()
            .iter()
            .map(|token| profile.weight(token).unwrap_or(0.0))
            .sum()
    }

    /// Budget nudge for `price`.
    ///
    /// Without a budget the effect is zero. At or under budget the bonus
    /// grows linearly from zero towards [`BUDGET_BONUS`] as the price
    /// approaches the budget. Over budget the penalty is linear in the
    /// overage and unbounded.
    ///
    /// # Examples
    /// ```
    /// use mealwise_core::RelevanceScorer;
    ///
    /// assert_eq!(RelevanceScorer::budget_effect(12.0, Some(12.0)), 0.5);
    /// assert_eq!(RelevanceScorer::budget_effect(15.0, Some(10.0)), -1.0);
    /// assert_eq!(RelevanceScorer::budget_effect(15.0, None), 0.0);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "budget proximity is a piecewise linear function of price"
    )]
    pub fn budget_effect(price: f64, budget: Option<f64>) -> f64 {
        let Some(limit) = budget else {
            return 0.0;
        };
        if price <= limit {
            (1.0 - (limit - price) / limit.max(1.0)).max(0.0) * BUDGET_BONUS
        } else {
            -(price - limit) * OVER_BUDGET_PENALTY
        }
    }
}

impl Scorer for RelevanceScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "relevance is a weighted sum of its components"
    )]
    fn score(&self, item: &MenuItem, profile: &PreferenceProfile, budget: Option<f64>) -> f64 {
        Self::token_score(item, profile) * TOKEN_WEIGHT
            + item.average_rating()
            + Self::budget_effect(item.price, budget)
    }
}

/// Score `item` with the default [`RelevanceScorer`].
#[must_use]
pub fn score(item: &MenuItem, profile: &PreferenceProfile, budget: Option<f64>) -> f64 {
    RelevanceScorer.score(item, profile, budget)
}
