//! Split free-text tag strings into lowercase tokens.
//!
//! Tags such as `"spicy, savory"` are lowercased, split on commas and then on
//! whitespace. Empty fragments are dropped. Duplicates are kept so callers can
//! decide whether to count occurrences or build a set.
//!
//! # Examples
//! ```
//! use mealwise_core::tokens::tag_tokens;
//!
//! assert_eq!(tag_tokens("Spicy, Sweet and Sour"), ["spicy", "sweet", "and", "sour"]);
//! assert!(tag_tokens(" , ").is_empty());
//! ```

/// Tokenise a tag string, preserving every fragment occurrence in order.
#[must_use]
pub fn tag_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(',')
        .flat_map(str::split_whitespace)
        .map(str::to_owned)
        .collect()
}
