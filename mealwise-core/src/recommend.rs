//! Rank or sample a catalog into a short list of suggestions.
//!
//! [`Recommender`] is generic over the [`Scorer`] so callers can swap the
//! relevance heuristic. Budgets are a soft signal: over-budget items stay in
//! the pool and are only penalised by the scorer. Callers wanting a hard cap
//! must filter the catalog first.

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::{MenuItem, PreferenceProfile, RelevanceScorer, Scorer, Strategy};

/// Number of suggestions returned when the caller does not choose.
pub const DEFAULT_TOP_K: usize = 3;

/// Parameters for a recommendation.
///
/// # Examples
/// ```rust
/// use mealwise_core::{RecommendRequest, Strategy};
///
/// let request = RecommendRequest {
///     budget: Some(15.0),
///     top_k: 2,
///     strategy: Strategy::Hybrid,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendRequest {
    /// Optional spending target; `None` leaves prices unscored.
    pub budget: Option<f64>,
    /// Maximum number of items to return.
    pub top_k: usize,
    /// Ranking strategy.
    pub strategy: Strategy,
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            budget: None,
            top_k: DEFAULT_TOP_K,
            strategy: Strategy::Best,
        }
    }
}

/// Errors returned by [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// `top_k` was zero.
    #[error("top_k must be at least 1")]
    InvalidTopK,
    /// The budget was below zero.
    #[error("budget must be non-negative, got {budget}")]
    NegativeBudget {
        /// Rejected budget.
        budget: f64,
    },
    /// The budget was NaN or infinite.
    #[error("budget must be a finite number")]
    NonFiniteBudget,
}

impl RecommendRequest {
    /// Check the request parameters.
    ///
    /// # Errors
    /// Returns [`RecommendError`] when `top_k` is zero or the budget is
    /// negative or non-finite.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.top_k == 0 {
            return Err(RecommendError::InvalidTopK);
        }
        match self.budget {
            Some(budget) if !budget.is_finite() => Err(RecommendError::NonFiniteBudget),
            Some(budget) if budget < 0.0 => Err(RecommendError::NegativeBudget { budget }),
            _ => Ok(()),
        }
    }
}

/// Produces ordered or sampled suggestions from a catalog.
#[derive(Debug, Clone, Default)]
pub struct Recommender<C = RelevanceScorer>
where
    C: Scorer,
{
    scorer: C,
}

impl<C> Recommender<C>
where
    C: Scorer,
{
    /// Construct a recommender around `scorer`.
    pub const fn new(scorer: C) -> Self {
        Self { scorer }
    }

    /// Suggest up to `request.top_k` items from `catalog`.
    ///
    /// - [`Strategy::Best`] scores every eligible item and returns the highest
    ///   scores first; ties keep catalog order.
    /// - [`Strategy::Random`] draws distinct items uniformly from `rng`
    ///   without scoring.
    /// - [`Strategy::Hybrid`] ranks like `Best`, takes the top half as a
    ///   quality pool, keeps `max(1, min(top_k, pool) / 2)` of its leaders and
    ///   fills the remaining slots at random from the rest of the ranking.
    ///
    /// Ineligible items (blank id or name, non-finite price) are ignored. An
    /// empty pool yields an empty list.
    ///
    /// # Errors
    /// Returns [`RecommendError`] when the request fails
    /// [`RecommendRequest::validate`]; no partial result is produced.
    pub fn recommend<'a, R>(
        &self,
        catalog: &'a [MenuItem],
        profile: &PreferenceProfile,
        request: &RecommendRequest,
        rng: &mut R,
    ) -> Result<Vec<&'a MenuItem>, RecommendError>
    where
        R: Rng + ?Sized,
    {
        request.validate()?;
        let pool: Vec<&MenuItem> = catalog.iter().filter(|item| item.is_eligible()).collect();
        debug!(
            "recommending up to {} of {} eligible items using the {} strategy",
            request.top_k,
            pool.len(),
            request.strategy
        );
        if pool.is_empty() {
            return Ok(Vec::new());
        }

        let picks = match request.strategy {
            Strategy::Random => {
                let mut picks = Vec::with_capacity(request.top_k.min(pool.len()));
                fill_at_random(&mut picks, pool, request.top_k, rng);
                picks
            }
            Strategy::Best => {
                let mut ranked = self.rank(pool, profile, request.budget);
                ranked.truncate(request.top_k);
                ranked
            }
            Strategy::Hybrid => {
                let ranked = self.rank(pool, profile, request.budget);
                hybrid_picks(ranked, request.top_k, rng)
            }
        };
        Ok(picks)
    }

    /// Score `pool` and sort it by descending score, keeping ties in order.
    fn rank<'a>(
        &self,
        pool: Vec<&'a MenuItem>,
        profile: &PreferenceProfile,
        budget: Option<f64>,
    ) -> Vec<&'a MenuItem> {
        let mut scored: Vec<(f64, &MenuItem)> = pool
            .into_iter()
            .map(|item| (self.scorer.score(item, profile, budget), item))
            .collect();
        scored.sort_by(|(left, _), (right, _)| right.total_cmp(left));
        scored.into_iter().map(|(_, item)| item).collect()
    }
}

/// Recommend with the default [`RelevanceScorer`].
///
/// # Errors
/// See [`Recommender::recommend`].
pub fn recommend<'a, R>(
    catalog: &'a [MenuItem],
    profile: &PreferenceProfile,
    request: &RecommendRequest,
    rng: &mut R,
) -> Result<Vec<&'a MenuItem>, RecommendError>
where
    R: Rng + ?Sized,
{
    Recommender::new(RelevanceScorer).recommend(catalog, profile, request, rng)
}

#[expect(
    clippy::integer_division,
    reason = "pool and guaranteed-pick sizes are floored halves"
)]
fn hybrid_picks<'a, R>(ranked: Vec<&'a MenuItem>, top_k: usize, rng: &mut R) -> Vec<&'a MenuItem>
where
    R: Rng + ?Sized,
{
    let pool_size = (ranked.len() / 2).max(1);
    let guaranteed = (top_k.min(pool_size) / 2).max(1).min(ranked.len());
    let mut remaining = ranked;
    let mut picks: Vec<&MenuItem> = remaining.drain(..guaranteed).collect();
    fill_at_random(&mut picks, remaining, top_k, rng);
    picks
}

/// Move uniformly chosen items from `remaining` into `picks` until `top_k`
/// are held or the pool runs dry.
fn fill_at_random<'a, R>(
    picks: &mut Vec<&'a MenuItem>,
    mut remaining: Vec<&'a MenuItem>,
    top_k: usize,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    while picks.len() < top_k && !remaining.is_empty() {
        let index = rng.gen_range(0..remaining.len());
        picks.push(remaining.remove(index));
    }
}
