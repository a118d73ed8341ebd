//! Language tag matching for literals
//!
//! A requested filter passes a literal when the normalised filter is a
//! string prefix of the literal's normalised tag. Normalising lower-cases
//! and turns `_` into `-`, so `en_GB` and `en-gb` are the same tag.
//!
//! The check is asymmetric: `en` matches `en`, `en-gb` and `en-us`, while
//! `en-gb` does not match a plain `en`. Literals without a tag always pass.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::errors::{Result, UnitsError};

static FILTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2}(-[a-z0-9]{1,8})*$").expect("language filter pattern is valid")
});

/// Lower-case a tag and replace underscores with hyphens
pub fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase().replace('_', "-")
}

/// A validated, normalised language filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageFilter(String);

impl LanguageFilter {
    /// Parse and validate a requested filter
    ///
    /// The primary subtag must be exactly two letters; `abc` is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use units_core::concepts::LanguageFilter;
    ///
    /// let filter = LanguageFilter::parse("en_GB").unwrap();
    /// assert_eq!(filter.as_str(), "en-gb");
    /// assert!(LanguageFilter::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize_tag(raw.trim());
        if !FILTER_PATTERN.is_match(&normalized) {
            return Err(UnitsError::InvalidFilter(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Parse an optional filter; an absent or blank value means "no filter"
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Does a tag satisfy this filter?
    pub fn matches_tag(&self, tag: &str) -> bool {
        normalize_tag(tag).starts_with(&self.0)
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decide whether a literal with language `tag` passes `filter`
///
/// No filter: pass. No tag: pass. Otherwise the filter must prefix the tag.
pub fn language_matches(tag: Option<&str>, filter: Option<&LanguageFilter>) -> bool {
    match (filter, tag) {
        (None, _) => true,
        (Some(_), None) => true,
        (Some(filter), Some(tag)) => filter.matches_tag(tag),
    }
}
