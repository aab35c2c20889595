//! Request tokens carried through the host's web request context.
//!
//! Zellij echoes the context map of a web request back with its result. The
//! token stored there identifies which fetch a response belongs to, letting the
//! session drop responses that were superseded while in flight.

use crate::domain::Page;
use std::collections::BTreeMap;

/// Context key marking a request as a zsplash search.
pub const KIND_KEY: &str = "zsplash_request";
const KIND_SEARCH: &str = "search";
const GENERATION_KEY: &str = "generation";
const PAGE_KEY: &str = "page";
const QUERY_KEY: &str = "query";

/// Identifies one fetch issued by the search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    /// Session generation at the time the request was issued.
    pub generation: u64,
    /// Page that was requested.
    pub page: Page,
    /// Query text, kept for logging.
    pub query: String,
}

impl RequestToken {
    /// Serializes the token into web request context entries.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KIND_KEY.to_string(), KIND_SEARCH.to_string()),
            (GENERATION_KEY.to_string(), self.generation.to_string()),
            (PAGE_KEY.to_string(), self.page.to_string()),
            (QUERY_KEY.to_string(), self.query.clone()),
        ])
    }

    /// Reads a token back from a web request result context.
    ///
    /// Returns `None` when the context does not belong to a search request or
    /// any field is missing or unparsable.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsplash::api::RequestToken;
    /// use zsplash::domain::Page;
    ///
    /// let token = RequestToken { generation: 7, page: Page::FIRST, query: "fox".into() };
    /// assert_eq!(RequestToken::from_context(&token.to_context()), Some(token));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(KIND_KEY).map(String::as_str) != Some(KIND_SEARCH) {
            return None;
        }
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        let page = Page::new(context.get(PAGE_KEY)?.parse().ok()?)?;
        let query = context.get(QUERY_KEY).cloned().unwrap_or_default();
        Some(Self {
            generation,
            page,
            query,
        })
    }
}
