//! Ranking strategies understood by the recommender.
//!
//! # Examples
//! ```
//! use mealwise_core::Strategy;
//!
//! assert_eq!(Strategy::Hybrid.as_str(), "hybrid");
//! assert_eq!("Random".parse::<Strategy>(), Ok(Strategy::Random));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the recommender turns a catalog into a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Strategy {
    /// Highest relevance scores first.
    #[default]
    Best,
    /// Uniform sample without replacement, ignoring scores.
    Random,
    /// A few top-scoring picks topped up with random exploration.
    Hybrid,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (expected best, random or hybrid)")]
pub struct StrategyParseError(pub String);

impl Strategy {
    /// Return the strategy as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Random => "random",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best" => Ok(Self::Best),
            "random" => Ok(Self::Random),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(StrategyParseError(s.to_owned())),
        }
    }
}
