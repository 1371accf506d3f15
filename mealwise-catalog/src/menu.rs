//! An owned, id-unique collection of menu items.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use mealwise_core::{
    AnalyticsError, CatalogSummary, MAX_RATING, MIN_RATING, MenuItem, MenuItemError,
    PreferenceProfile, RecommendError, RecommendRequest, analyze, recommend, tokens::tag_tokens,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::MenuError;

/// A menu whose item ids are unique.
///
/// Items keep their insertion order, which is the tie-break order for every
/// ranking the engine performs.
///
/// # Examples
/// ```
/// use mealwise_catalog::Menu;
/// use mealwise_core::MenuItem;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut menu = Menu::new();
/// menu.add(MenuItem::new("1", "Pasta", 12.5)?.with_diet("vegetarian"))?;
/// menu.add_rating("1", 5)?;
/// assert_eq!(menu.count_vegetarian(), 1);
/// assert_eq!(menu.get("1").map(MenuItem::average_rating), Some(5.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Construct an empty menu.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a menu from `items`, validating each one.
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidItem`] or [`MenuError::DuplicateId`] for the
    /// first offending item.
    pub fn from_items(items: impl IntoIterator<Item = MenuItem>) -> Result<Self, MenuError> {
        let mut menu = Self::new();
        menu.add_many(items)?;
        Ok(menu)
    }

    /// Append a validated item.
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidItem`] when validation fails and
    /// [`MenuError::DuplicateId`] when the id is taken.
    pub fn add(&mut self, item: MenuItem) -> Result<(), MenuError> {
        item.validate()?;
        if self.contains(&item.id) {
            return Err(MenuError::DuplicateId { id: item.id });
        }
        self.items.push(item);
        Ok(())
    }

    /// Append several items at once.
    ///
    /// The batch is all or nothing: when any item is invalid or repeats an
    /// id, the menu is left unchanged.
    ///
    /// # Errors
    /// See [`Menu::add`].
    pub fn add_many(&mut self, items: impl IntoIterator<Item = MenuItem>) -> Result<(), MenuError> {
        let batch: Vec<MenuItem> = items.into_iter().collect();
        let mut seen: HashSet<&str> = self.items.iter().map(|item| item.id.as_str()).collect();
        for item in &batch {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(MenuError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }
        self.items.extend(batch);
        Ok(())
    }

    /// Remove and return the item with `id`.
    pub fn remove(&mut self, id: &str) -> Option<MenuItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Report whether an item with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MenuItem> {
        self.items.iter()
    }

    /// Borrow the items as a catalog slice.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Record a new rating for the item with `id`.
    ///
    /// # Errors
    /// Returns [`MenuError::UnknownId`] when no item matches and
    /// [`MenuError::InvalidItem`] when the rating is outside `1..=5`.
    pub fn add_rating(&mut self, id: &str, rating: u8) -> Result<(), MenuError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| MenuError::UnknownId { id: id.to_owned() })?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(MenuItemError::InvalidRating { rating }.into());
        }
        item.ratings.push(rating);
        Ok(())
    }

    /// Items whose diet contains `restriction`, ignoring case and padding.
    #[must_use]
    pub fn filter_by_diet(&self, restriction: &str) -> Vec<&MenuItem> {
        let needle = restriction.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.diet.to_lowercase().contains(&needle))
            .collect()
    }

    /// Items priced at or below `max_price`.
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidPriceCap`] when `max_price` is negative or
    /// NaN.
    pub fn filter_by_price(&self, max_price: f64) -> Result<Vec<&MenuItem>, MenuError> {
        if max_price.is_nan() || max_price < 0.0 {
            return Err(MenuError::InvalidPriceCap { max_price });
        }
        Ok(self
            .items
            .iter()
            .filter(|item| item.price <= max_price)
            .collect())
    }

    /// Mean price, or `0.0` for an empty menu.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean price divides the sum by the item count"
    )]
    pub fn average_price(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|item| item.price).sum::<f64>() / self.items.len() as f64
    }

    /// Number of items whose diet mentions "vegetarian".
    #[must_use]
    pub fn count_vegetarian(&self) -> usize {
        self.filter_by_diet("vegetarian").len()
    }

    /// Rank items by how many distinct query words they share with the
    /// item's flavour and diet tokens.
    ///
    /// Query words are split like item tags. Every item is ranked, so items
    /// without any overlap still fill the list once the matches run out.
    ///
    /// # Errors
    /// Returns [`MenuError::InvalidTopK`] when `top_k` is zero.
    pub fn search(&self, text: &str, top_k: usize) -> Result<Vec<&MenuItem>, MenuError> {
        if top_k == 0 {
            return Err(MenuError::InvalidTopK);
        }
        let query: BTreeSet<String> = tag_tokens(text).into_iter().collect();
        let mut ranked: Vec<(usize, &MenuItem)> = self
            .items
            .iter()
            .map(|item| (item.token_set().intersection(&query).count(), item))
            .collect();
        ranked.sort_by(|(left, _), (right, _)| right.cmp(left));
        Ok(ranked
            .into_iter()
            .take(top_k)
            .map(|(_, item)| item)
            .collect())
    }

    /// Pick a random item whose flavour contains `flavor` and, when a budget
    /// is given, whose price fits it.
    pub fn suggest_by_flavor<R>(
        &self,
        flavor: &str,
        budget: Option<f64>,
        rng: &mut R,
    ) -> Option<&MenuItem>
    where
        R: Rng + ?Sized,
    {
        let needle = flavor.to_lowercase();
        let candidates: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|item| item.flavor.to_lowercase().contains(&needle))
            .filter(|item| budget.is_none_or(|limit| item.price <= limit))
            .collect();
        debug!(
            "{} items match flavour '{flavor}' within budget {budget:?}",
            candidates.len()
        );
        candidates.choose(rng).copied()
    }

    /// Recommend from this menu.
    ///
    /// # Errors
    /// See [`mealwise_core::recommend`].
    pub fn recommend<R>(
        &self,
        profile: &PreferenceProfile,
        request: &RecommendRequest,
        rng: &mut R,
    ) -> Result<Vec<&MenuItem>, RecommendError>
    where
        R: Rng + ?Sized,
    {
        recommend(&self.items, profile, request, rng)
    }

    /// Summarise this menu.
    ///
    /// # Errors
    /// See [`mealwise_core::analyze`].
    pub fn analytics(&self, top_n: usize) -> Result<CatalogSummary, AnalyticsError> {
        analyze(&self.items, top_n)
    }
}

impl<'a> IntoIterator for &'a Menu {
    type Item = &'a MenuItem;
    type IntoIter = std::slice::Iter<'a, MenuItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_core::test_support::{item, sample_catalog};
    use mealwise_core::Strategy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn menu() -> Menu {
        Menu::from_items(sample_catalog()).expect("sample catalog is valid")
    }

    fn ids(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|dish| dish.id.clone()).collect()
    }

    #[rstest]
    fn rejects_duplicate_ids(mut menu: Menu) {
        let err = menu
            .add(item("1", 3.0, "", "", &[]))
            .expect_err("duplicate id");
        assert_eq!(err, MenuError::DuplicateId { id: "1".into() });
        assert_eq!(menu.len(), 6);
    }

    #[rstest]
    fn add_many_is_atomic(mut menu: Menu) {
        let batch = vec![item("7", 3.0, "", "", &[]), item("7", 4.0, "", "", &[])];
        assert!(menu.add_many(batch).is_err());
        assert!(!menu.contains("7"));
    }

    #[rstest]
    fn rejects_invalid_items(mut menu: Menu) {
        let err = menu
            .add(item("bad", -1.0, "", "", &[]))
            .expect_err("negative price");
        assert!(matches!(
            err,
            MenuError::InvalidItem(MenuItemError::InvalidPrice { .. })
        ));
    }

    #[rstest]
    fn remove_returns_the_item(mut menu: Menu) {
        let removed = menu.remove("3").expect("item exists");
        assert_eq!(removed.id, "3");
        assert!(menu.get("3").is_none());
        assert!(menu.remove("3").is_none());
    }

    #[rstest]
    fn add_rating_validates_range_and_id(mut menu: Menu) {
        menu.add_rating("4", 3).expect("valid rating");
        assert_eq!(menu.get("4").map(|dish| dish.ratings.clone()), Some(vec![3]));
        assert!(matches!(
            menu.add_rating("4", 6),
            Err(MenuError::InvalidItem(MenuItemError::InvalidRating {
                rating: 6
            }))
        ));
        assert_eq!(
            menu.add_rating("missing", 3),
            Err(MenuError::UnknownId {
                id: "missing".into()
            })
        );
    }

    #[rstest]
    fn filters_by_diet_case_insensitively(menu: Menu) {
        assert_eq!(ids(&menu.filter_by_diet("  VEGAN ")), ["2", "6"]);
        assert_eq!(menu.count_vegetarian(), 2);
    }

    #[rstest]
    fn filters_by_price_inclusively(menu: Menu) {
        let cheap = menu.filter_by_price(9.0).expect("valid cap");
        assert_eq!(ids(&cheap), ["2", "4"]);
        assert_eq!(
            menu.filter_by_price(-1.0),
            Err(MenuError::InvalidPriceCap { max_price: -1.0 })
        );
    }

    #[rstest]
    fn average_price_of_empty_menu_is_zero() {
        assert_eq!(Menu::new().average_price(), 0.0);
    }

    #[rstest]
    fn search_ranks_by_shared_words(menu: Menu) {
        let hits = menu.search("Spicy vegan", 2).expect("valid top_k");
        assert_eq!(ids(&hits), ["2", "6"]);
        assert_eq!(menu.search("spicy", 0), Err(MenuError::InvalidTopK));
    }

    #[rstest]
    fn suggests_within_budget(menu: Menu) {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pick = menu
            .suggest_by_flavor("SPICY", Some(10.0), &mut rng)
            .expect("one match");
        assert_eq!(pick.id, "2");
        assert!(menu.suggest_by_flavor("bitter", None, &mut rng).is_none());
    }

    #[rstest]
    fn delegates_recommendation_and_analytics(menu: Menu) {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let request = RecommendRequest {
            budget: None,
            top_k: 2,
            strategy: Strategy::Best,
        };
        let picks = menu
            .recommend(&PreferenceProfile::new(), &request, &mut rng)
            .expect("valid request");
        assert_eq!(picks.len(), 2);
        assert_eq!(menu.analytics(1).expect("valid top_n").total_meals, 6);
    }
}
