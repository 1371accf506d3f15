//! Core domain types and algorithms for the Mealwise engine.
//!
//! The crate turns a user's selection history into a token
//! [`PreferenceProfile`], scores [`MenuItem`] records against that profile and
//! an optional budget, and ranks or samples a catalog under one of three
//! [`Strategy`] values. Catalog-wide statistics come from [`analyze`].
//!
//! Every operation is a pure function of its inputs. Randomised strategies
//! take the random source as an explicit argument so callers can seed it.
//!
//! # Examples
//!
//! ```
//! use mealwise_core::{MenuItem, RecommendRequest, Strategy, learn, recommend};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = vec![
//!     MenuItem::new("1", "Tofu Bowl", 9.5)?.with_diet("vegan").with_flavor("spicy"),
//!     MenuItem::new("2", "Steak", 24.0)?.with_diet("meat").with_flavor("rich"),
//! ];
//! let profile = learn(&catalog, &["1", "1"]);
//! let request = RecommendRequest {
//!     budget: Some(12.0),
//!     top_k: 1,
//!     strategy: Strategy::Best,
//! };
//! let mut rng = StdRng::seed_from_u64(7);
//! let picks = recommend(&catalog, &profile, &request, &mut rng)?;
//! assert_eq!(picks.first().map(|item| item.id.as_str()), Some("1"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analytics;
mod item;
mod kind;
mod learner;
mod profile;
mod recommend;
pub mod scorer;
mod strategy;
pub mod tokens;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use analytics::{AnalyticsError, CatalogSummary, RatedItem, analyze};
pub use item::{MAX_RATING, MIN_RATING, MenuItem, MenuItemError};
pub use kind::{
    DEFAULT_BUNDLE_DISCOUNT, DEFAULT_BUNDLE_ITEMS, DEFAULT_PREPARATION_MINUTES, MealKind,
};
pub use learner::learn;
pub use profile::PreferenceProfile;
pub use recommend::{DEFAULT_TOP_K, RecommendError, RecommendRequest, Recommender, recommend};
pub use scorer::{RelevanceScorer, Scorer, score};
pub use strategy::{Strategy, StrategyParseError};
