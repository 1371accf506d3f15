//! The menu item record shared by every engine component.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MealKind, tokens::tag_tokens};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A single dish offered on a menu.
///
/// The engine only ever reads these records. Ratings are an immutable
/// snapshot; adding a rating is the catalog's job.
///
/// # Examples
/// ```
/// use mealwise_core::MenuItem;
///
/// # fn main() -> Result<(), mealwise_core::MenuItemError> {
/// let item = MenuItem::new("7", "Pad Thai", 11.0)?
///     .with_diet("vegetarian")
///     .with_flavor("sweet, savory")
///     .with_ratings([5, 4])?;
/// assert_eq!(item.average_rating(), 4.5);
/// assert!(item.token_set().contains("savory"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MenuItem {
    /// Unique identifier within a catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Non-negative price.
    pub price: f64,
    /// Energy content in kilocalories.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calories: u32,
    /// Dietary tags, optionally comma separated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub diet: String,
    /// Flavour tags, optionally comma separated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flavor: String,
    /// Ratings in `1..=5`, oldest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratings: Vec<u8>,
    /// Preparation style used for value scoring.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: MealKind,
}

/// Errors returned when constructing or validating a [`MenuItem`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuItemError {
    /// The identifier was empty or whitespace.
    #[error("menu item id must not be empty")]
    EmptyId,
    /// The display name was empty or whitespace.
    #[error("menu item {id} must have a name")]
    EmptyName {
        /// Identifier of the offending item.
        id: String,
    },
    /// The price was negative or not a finite number.
    #[error("menu item {id} has invalid price {price}")]
    InvalidPrice {
        /// Identifier of the offending item.
        id: String,
        /// Rejected price.
        price: f64,
    },
    /// A rating fell outside `1..=5`.
    #[error("rating {rating} is outside 1..=5")]
    InvalidRating {
        /// Rejected rating.
        rating: u8,
    },
}

impl MenuItem {
    /// Validate and construct an item with empty tags and no ratings.
    ///
    /// # Errors
    /// Returns [`MenuItemError`] when the id or name is blank or the price is
    /// negative or non-finite.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, MenuItemError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            calories: 0,
            diet: String::new(),
            flavor: String::new(),
            ratings: Vec::new(),
            kind: MealKind::Standard,
        };
        item.validate()?;
        Ok(item)
    }

    /// Replace the dietary tags.
    #[must_use]
    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = diet.into();
        self
    }

    /// Replace the flavour tags.
    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = flavor.into();
        self
    }

    /// Set the calorie count.
    #[must_use]
    pub const fn with_calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    /// Set the preparation style.
    #[must_use]
    pub fn with_kind(mut self, kind: MealKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the ratings.
    ///
    /// # Errors
    /// Returns [`MenuItemError::InvalidRating`] for the first rating outside
    /// `1..=5`.
    pub fn with_ratings(
        mut self,
        ratings: impl IntoIterator<Item = u8>,
    ) -> Result<Self, MenuItemError> {
        let collected: Vec<u8> = ratings.into_iter().collect();
        if let Some(&rating) = collected.iter().find(|r| !is_valid_rating(**r)) {
            return Err(MenuItemError::InvalidRating { rating });
        }
        self.ratings = collected;
        Ok(self)
    }

    /// Check the record invariants.
    ///
    /// Deserialised records bypass [`MenuItem::new`], so loaders call this
    /// before handing items to the engine.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), MenuItemError> {
        if self.id.trim().is_empty() {
            return Err(MenuItemError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(MenuItemError::EmptyName {
                id: self.id.clone(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(MenuItemError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        if let Some(&rating) = self.ratings.iter().find(|r| !is_valid_rating(**r)) {
            return Err(MenuItemError::InvalidRating { rating });
        }
        Ok(())
    }

    /// Report whether the recommender may consider this item.
    ///
    /// An item is eligible when it carries an id, a name and a usable price.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty() && self.price.is_finite()
    }

    /// Every flavour and diet token, duplicates included.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = tag_tokens(&self.flavor);
        tokens.extend(tag_tokens(&self.diet));
        tokens
    }

    /// Distinct flavour and diet tokens.
    #[must_use]
    pub fn token_set(&self) -> BTreeSet<String> {
        self.tokens().into_iter().collect()
    }

    /// Flavour tokens only, duplicates included.
    #[must_use]
    pub fn flavor_tokens(&self) -> Vec<String> {
        tag_tokens(&self.flavor)
    }

    /// Mean of the ratings inside `1..=5`, or `0.0` when there are none.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "averaging ratings divides a small integer sum by its count"
    )]
    pub fn average_rating(&self) -> f64 {
        let (sum, count) = self
            .ratings
            .iter()
            .copied()
            .filter(|r| is_valid_rating(*r))
            .fold((0_u64, 0_usize), |(sum, count), r| {
                (sum + u64::from(r), count + 1)
            });
        if count == 0 {
            return 0.0;
        }
        sum as f64 / count as f64
    }

    /// Report whether at least one rating is inside `1..=5`.
    #[must_use]
    pub fn has_ratings(&self) -> bool {
        self.ratings.iter().any(|r| is_valid_rating(*r))
    }
}

pub(crate) const fn is_valid_rating(rating: u8) -> bool {
    rating >= MIN_RATING && rating <= MAX_RATING
}
