//! Fixtures shared by unit, behaviour and downstream crate tests.

use crate::{MealKind, MenuItem, PreferenceProfile, Scorer};

/// Build a menu item named `Dish {id}` without validation.
///
/// Tests use this to construct records that [`MenuItem::new`] would reject.
#[must_use]
pub fn item(id: &str, price: f64, diet: &str, flavor: &str, ratings: &[u8]) -> MenuItem {
    MenuItem {
        id: id.to_owned(),
        name: format!("Dish {id}"),
        price,
        calories: 0,
        diet: diet.to_owned(),
        flavor: flavor.to_owned(),
        ratings: ratings.to_vec(),
        kind: MealKind::Standard,
    }
}

/// A small catalog mixing diets, flavours, prices and rating histories.
#[must_use]
pub fn sample_catalog() -> Vec<MenuItem> {
    vec![
        item("1", 12.5, "vegetarian", "savory, umami", &[5, 4]),
        item("2", 9.0, "vegan", "spicy", &[4]),
        item("3", 24.0, "meat", "rich, smoky", &[5, 5, 3]),
        item("4", 6.5, "vegetarian", "sweet", &[]),
        item("5", 15.0, "pescatarian", "fresh, citrus", &[2, 3]),
        item("6", 11.0, "vegan", "savory, spicy", &[4, 4]),
    ]
}

/// Scores cheaper items higher, ignoring the profile and budget.
#[derive(Debug, Copy, Clone, Default)]
pub struct PriceScorer;

impl Scorer for PriceScorer {
    fn score(&self, item: &MenuItem, _profile: &PreferenceProfile, _budget: Option<f64>) -> f64 {
        -item.price
    }
}
