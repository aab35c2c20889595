//! Validated search inputs: [`SearchQuery`] and [`Page`].
//!
//! Both types enforce their invariants at construction so the API client never
//! sees an empty query or a zero page.

use super::error::{Result, ZsplashError};
use std::fmt;
use std::num::NonZeroU32;

/// Number of results requested per page.
pub const PER_PAGE: u32 = 12;

/// Message shown when the user submits an empty query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term!";

/// A trimmed, non-empty search string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `text` and rejects it if nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`ZsplashError::Validation`] for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsplash::domain::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse("  fox ").unwrap().as_str(), "fox");
    /// assert!(SearchQuery::parse(" \t").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ZsplashError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(NonZeroU32);

impl Page {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0.get() == 1
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
