//! Preparation styles and their value-for-money formulas.
//!
//! Each style carries only the data its formula needs, so a catalog can mix
//! everyday dishes, chef specials and combo deals in one list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MenuItem;

/// Preparation time assumed for a specialty dish.
pub const DEFAULT_PREPARATION_MINUTES: u32 = 30;
/// Item count assumed for a bundle.
pub const DEFAULT_BUNDLE_ITEMS: u32 = 2;
/// Discount assumed for a bundle, in percent.
pub const DEFAULT_BUNDLE_DISCOUNT: f64 = 20.0;

/// How a dish is prepared and sold.
///
/// # Examples
/// ```
/// use mealwise_core::{MealKind, MenuItem};
///
/// # fn main() -> Result<(), mealwise_core::MenuItemError> {
/// let item = MenuItem::new("b1", "Family Combo", 20.0)?.with_kind(MealKind::bundle());
/// assert_eq!(item.kind.value_score(&item), 46.0);
/// assert_eq!(item.kind.preparation_info(), "Bundle of 2 items: 20% off");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum MealKind {
    /// Regular dish with standard preparation.
    #[default]
    Standard,
    /// Chef-prepared dish with a longer preparation time.
    Specialty {
        /// Minutes needed to prepare the dish.
        preparation_minutes: u32,
    },
    /// Several items sold together at a discount.
    Bundle {
        /// Number of items in the bundle.
        num_items: u32,
        /// Discount applied to the bundle, in percent.
        discount_percent: f64,
    },
}

impl MealKind {
    /// A specialty dish with the default preparation time.
    #[must_use]
    pub const fn specialty() -> Self {
        Self::Specialty {
            preparation_minutes: DEFAULT_PREPARATION_MINUTES,
        }
    }

    /// A bundle with the default size and discount.
    #[must_use]
    pub const fn bundle() -> Self {
        Self::Bundle {
            num_items: DEFAULT_BUNDLE_ITEMS,
            discount_percent: DEFAULT_BUNDLE_DISCOUNT,
        }
    }

    /// Lowercase name of the style, matching the serialised tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Specialty { .. } => "specialty",
            Self::Bundle { .. } => "bundle",
        }
    }

    /// Value-for-money score for `item` under this style.
    ///
    /// - standard: calories per unit price plus twice the average rating;
    /// - specialty: five times the average rating minus a hundredth of the
    ///   preparation minutes;
    /// - bundle: twice the discount, three per item, twice the average rating.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "value scores are weighted sums of prices, ratings and discounts"
    )]
    pub fn value_score(&self, item: &MenuItem) -> f64 {
        let rating = item.average_rating();
        match self {
            Self::Standard => f64::from(item.calories) / item.price.max(0.01) + rating * 2.0,
            Self::Specialty {
                preparation_minutes,
            } => rating * 5.0 - f64::from(*preparation_minutes) / 100.0,
            Self::Bundle {
                num_items,
                discount_percent,
            } => discount_percent * 2.0 + f64::from(*num_items) * 3.0 + rating * 2.0,
        }
    }

    /// Short human-readable preparation note.
    #[must_use]
    pub fn preparation_info(&self) -> String {
        match self {
            Self::Standard => "Standard preparation: 15-20 minutes".to_owned(),
            Self::Specialty {
                preparation_minutes,
            } => format!("Chef-prepared: {preparation_minutes} minutes"),
            Self::Bundle {
                num_items,
                discount_percent,
            } => format!("Bundle of {num_items} items: {discount_percent}% off"),
        }
    }
}
