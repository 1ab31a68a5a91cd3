//! Keyword search values.

use super::MerchantDomainError;
use std::fmt;

/// Non-blank search keyword.
///
/// Surrounding whitespace is kept and takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKeyword(String);

impl SearchKeyword {
    /// Creates a validated keyword.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantDomainError::EmptySearchKeyword`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, MerchantDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(MerchantDomainError::EmptySearchKeyword);
        }
        Ok(Self(raw))
    }

    /// Returns the keyword as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Letter-case handling for substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// `"Feed"` does not match `"feed"`.
    #[default]
    CaseSensitive,
    /// Letter case is ignored.
    CaseInsensitive,
}

impl SearchMode {
    /// Maps a configuration flag onto a mode.
    #[must_use]
    pub const fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::CaseSensitive
        } else {
            Self::CaseInsensitive
        }
    }

    /// Returns `true` when `haystack` contains `needle` under this mode.
    #[must_use]
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => haystack.contains(needle),
            Self::CaseInsensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}
