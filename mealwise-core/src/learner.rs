//! Learn token preferences from a user's selection history.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{MenuItem, PreferenceProfile};

/// Derive a normalised [`PreferenceProfile`] from `history`.
///
/// Each history entry is resolved against `catalog` by id; the last item wins
/// when ids repeat. Unknown ids are skipped so stale history referencing
/// removed dishes still yields a profile. Every flavour and diet token
/// occurrence of a resolved item increments its counter, and repeated history
/// entries count again. The counts are then divided by their total, so a
/// non-empty profile sums to one.
///
/// The function is pure: the same inputs always produce the same profile.
///
/// # Examples
/// ```
/// use mealwise_core::{MenuItem, learn};
///
/// # fn main() -> Result<(), mealwise_core::MenuItemError> {
/// let catalog = vec![
///     MenuItem::new("1", "Tofu", 9.0)?.with_diet("vegan").with_flavor("spicy"),
///     MenuItem::new("2", "Flan", 4.0)?.with_flavor("sweet"),
/// ];
/// let profile = learn(&catalog, &["1", "2", "missing"]);
/// assert_eq!(profile.weight("spicy"), Some(1.0 / 3.0));
/// assert_eq!(profile.weight("sweet"), Some(1.0 / 3.0));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn learn<S: AsRef<str>>(catalog: &[MenuItem], history: &[S]) -> PreferenceProfile {
    let lookup: HashMap<&str, &MenuItem> = catalog
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut total = 0_u64;
    for entry in history {
        let id = entry.as_ref();
        let Some(item) = lookup.get(id) else {
            debug!("skipping history entry {id}: not in catalog");
            continue;
        };
        for token in item.tokens() {
            *counts.entry(token).or_default() += 1;
            total += 1;
        }
    }

    if total == 0 {
        return PreferenceProfile::new();
    }
    PreferenceProfile::from_normalised(normalise_counts(counts, total))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "normalising divides token counts by the total occurrence count"
)]
fn normalise_counts(counts: BTreeMap<String, u64>, total: u64) -> BTreeMap<String, f64> {
    let denominator = total as f64;
    counts
        .into_iter()
        .map(|(token, count)| (token, count as f64 / denominator))
        .collect()
}
