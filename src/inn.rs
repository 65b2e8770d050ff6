//! Tax identifier (INN) normalization.
//!
//! Registry payloads carry identifiers in whatever shape the upstream data
//! entry produced: padded with whitespace, truncated, or replaced by other
//! registration numbers entirely. Everything funnels through [`normalize`],
//! which either yields a validated [`Inn`] or nothing. Malformed input is an
//! expected condition here, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::inn::VALID_LENGTHS;

/// A validated tax identifier: 10 digits for legal entities, 12 for
/// individual entrepreneurs.
///
/// Values are only constructed through [`normalize`], so holding an `Inn`
/// implies the format check already passed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inn(String);

impl Inn {
    /// Return the identifier digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Inn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a raw identifier string.
///
/// Trims surrounding whitespace and accepts only all-digit strings of a
/// valid INN length. Returns `None` for anything else; never panics.
pub fn normalize(raw: &str) -> Option<Inn> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if !VALID_LENGTHS.contains(&trimmed.chars().count()) {
        return None;
    }
    Some(Inn(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_legal_entity_length() {
        let inn = normalize("7707083893").expect("10 digits is valid");
        assert_eq!(inn.as_str(), "7707083893");
    }

    #[test]
    fn normalize_accepts_entrepreneur_length() {
        assert!(normalize("770708389312").is_some());
    }

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        let inn = normalize("  7707083893\n").expect("whitespace is trimmed");
        assert_eq!(inn.as_str(), "7707083893");
    }

    #[test]
    fn normalize_rejects_wrong_lengths() {
        assert!(normalize("").is_none());
        assert!(normalize("123").is_none());
        assert!(normalize("12345678901").is_none());
        assert!(normalize("1234567890123").is_none());
    }

    #[test]
    fn normalize_rejects_non_digits() {
        assert!(normalize("77070838A3").is_none());
        assert!(normalize("7707-08389").is_none());
        // Unicode digits outside ASCII are not registry identifiers.
        assert!(normalize("٧٧٠٧٠٨٣٨٩٣").is_none());
    }
}
