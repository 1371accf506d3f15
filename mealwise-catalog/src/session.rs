//! Per-user state: selection history, budget and the learned profile.

use mealwise_core::{MenuItem, PreferenceProfile, RecommendRequest, Strategy, learn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Menu, SessionError};

/// A user's history, optional budget and learned preferences.
///
/// The profile is a cache of [`learn`] over the history; methods that change
/// the history take the menu so they can relearn straight away.
///
/// # Examples
/// ```
/// use mealwise_catalog::{Menu, UserSession};
/// use mealwise_core::MenuItem;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let menu = Menu::from_items([
///     MenuItem::new("1", "Tofu", 9.0)?.with_diet("vegan").with_flavor("spicy"),
/// ])?;
/// let mut session = UserSession::new(Vec::new(), Some(15.0))?;
/// session.add_to_history("1", &menu);
/// assert_eq!(session.profile.weight("vegan"), Some(0.5));
/// assert!(session.check_budget(12.0)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSession {
    /// Item ids the user picked, oldest first.
    pub history: Vec<String>,
    /// Spending target, if any.
    pub budget: Option<f64>,
    /// Token weights learned from `history`.
    #[serde(default)]
    pub profile: PreferenceProfile,
}

impl UserSession {
    /// Start a session with an empty profile.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the budget is negative or non-finite.
    pub fn new(history: Vec<String>, budget: Option<f64>) -> Result<Self, SessionError> {
        validate_budget(budget)?;
        Ok(Self {
            history,
            budget,
            profile: PreferenceProfile::new(),
        })
    }

    /// Check the session invariants after deserialisation.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the stored budget is invalid.
    pub fn validate(&self) -> Result<(), SessionError> {
        validate_budget(self.budget)
    }

    /// Change the budget.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the budget is negative or non-finite; the
    /// old budget is kept.
    pub fn set_budget(&mut self, budget: Option<f64>) -> Result<(), SessionError> {
        validate_budget(budget)?;
        self.budget = budget;
        Ok(())
    }

    /// Record a pick and relearn the profile from `menu`.
    ///
    /// Ids missing from the menu are still recorded; learning skips them.
    pub fn add_to_history(&mut self, id: impl Into<String>, menu: &Menu) {
        self.history.push(id.into());
        self.update_preferences(menu);
    }

    /// Relearn the profile from the full history.
    pub fn update_preferences(&mut self, menu: &Menu) {
        self.profile = learn(menu.items(), &self.history);
    }

    /// Forget the history and the profile learned from it.
    pub fn reset_history(&mut self) {
        self.history.clear();
        self.profile.clear();
    }

    /// Forget the learned profile but keep the history.
    pub fn reset_preferences(&mut self) {
        self.profile.clear();
    }

    /// Report whether `price` fits the budget; always `true` without one.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidPrice`] for negative or non-finite
    /// prices.
    pub fn check_budget(&self, price: f64) -> Result<bool, SessionError> {
        if !price.is_finite() || price < 0.0 {
            return Err(SessionError::InvalidPrice { price });
        }
        Ok(self.budget.is_none_or(|limit| price <= limit))
    }

    /// Recommend from `menu` using this session's profile and budget.
    ///
    /// # Errors
    /// Returns [`SessionError::Recommend`] when `top_k` is zero.
    pub fn recommend<'a, R>(
        &self,
        menu: &'a Menu,
        top_k: usize,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<Vec<&'a MenuItem>, SessionError>
    where
        R: Rng + ?Sized,
    {
        let request = RecommendRequest {
            budget: self.budget,
            top_k,
            strategy,
        };
        Ok(menu.recommend(&self.profile, &request, rng)?)
    }
}

fn validate_budget(budget: Option<f64>) -> Result<(), SessionError> {
    match budget {
        Some(value) if !value.is_finite() => Err(SessionError::NonFiniteBudget),
        Some(value) if value < 0.0 => Err(SessionError::NegativeBudget { budget: value }),
        _ => Ok(()),
    }
}
