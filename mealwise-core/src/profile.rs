//! Preference profiles: per-token user weights in `[0.0, 1.0]`.
//!
//! Profiles are usually produced by [`learn`](crate::learn), which yields a
//! normalised histogram whose weights sum to one. Hand-built profiles are
//! also accepted; their weights are clamped but not normalised.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User preference weighting across diet and flavour tokens.
///
/// Tokens are matched verbatim against the lowercase tokens of a
/// [`MenuItem`](crate::MenuItem), so keys should be lowercase.
///
/// # Examples
/// ```
/// use mealwise_core::PreferenceProfile;
///
/// let profile = PreferenceProfile::new()
///     .with_weight("spicy", 0.6)
///     .with_weight("vegan", 0.4);
/// assert_eq!(profile.weight("spicy"), Some(0.6));
/// assert!(profile.weight("sweet").is_none());
/// ```
///
/// Serialised as a plain token map. Deserialisation clamps every weight the
/// same way [`PreferenceProfile::set_weight`] does.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")
)]
pub struct PreferenceProfile {
    weights: BTreeMap<String, f64>,
}

impl PreferenceProfile {
    /// Construct an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the weight for a token, if present.
    #[must_use]
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Insert or update a token weight.
    ///
    /// Values are clamped into `0.0..=1.0`; non-finite values become `0.0`.
    pub fn set_weight(&mut self, token: impl Into<String>, weight: f64) {
        let clamped = if weight.is_finite() {
            weight.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.weights.insert(token.into(), clamped);
    }

    /// Add a token weight while returning `self` for chaining.
    #[must_use]
    pub fn with_weight(mut self, token: impl Into<String>, weight: f64) -> Self {
        self.set_weight(token, weight);
        self
    }

    /// Number of weighted tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether the profile holds no weights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over `(token, weight)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(token, weight)| (token.as_str(), *weight))
    }

    /// Sum of all weights.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "summing weights")]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Remove every weight.
    pub fn clear(&mut self) {
        self.weights.clear();
    }

    /// Build a profile from weights that are already normalised.
    pub(crate) const fn from_normalised(weights: BTreeMap<String, f64>) -> Self {
        Self { weights }
    }
}

impl FromIterator<(String, f64)> for PreferenceProfile {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (token, weight) in iter {
            profile.set_weight(token, weight);
        }
        profile
    }
}

impl From<BTreeMap<String, f64>> for PreferenceProfile {
    fn from(weights: BTreeMap<String, f64>) -> Self {
        weights.into_iter().collect()
    }
}

impl From<PreferenceProfile> for BTreeMap<String, f64> {
    fn from(profile: PreferenceProfile) -> Self {
        profile.weights
    }
}
