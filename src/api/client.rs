//! Search request construction.
//!
//! [`ApiClient`] turns a validated query and page into a [`SearchRequest`]: the
//! URL, headers and context map handed to the host's web request facility. It
//! does not perform I/O itself; the plugin shell executes the request and feeds
//! the result back as an event.

use super::token::RequestToken;
use crate::domain::{Page, Result, SearchQuery, ZsplashError, PER_PAGE};
use crate::observability::TraceContext;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Fixed photo search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

/// Characters left unescaped in query string values (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A fully built GET request for one page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Echoed back by the host with the response.
    pub context: BTreeMap<String, String>,
}

/// Builds authenticated search requests.
#[derive(Clone)]
pub struct ApiClient {
    endpoint: String,
    access_key: String,
    per_page: u32,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"<redacted>")
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ZsplashError::Config`] if the access key is blank.
    pub fn new(access_key: &str) -> Result<Self> {
        let access_key = access_key.trim();
        if access_key.is_empty() {
            return Err(ZsplashError::Config(
                "API access key is empty".to_string(),
            ));
        }
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: access_key.to_string(),
            per_page: PER_PAGE,
        })
    }

    /// Overrides the search endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request for `page` of `query`.
    ///
    /// The credential goes into the `Authorization: Client-ID <key>` header and
    /// the token plus the current trace context into the context map.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsplash::api::{ApiClient, RequestToken};
    /// use zsplash::domain::{Page, SearchQuery};
    ///
    /// let client = ApiClient::new("key").unwrap();
    /// let query = SearchQuery::parse("red fox").unwrap();
    /// let token = RequestToken { generation: 1, page: Page::FIRST, query: query.to_string() };
    /// let request = client.search_request(&query, Page::FIRST, &token);
    /// assert_eq!(
    ///     request.url,
    ///     "https://api.unsplash.com/search/photos?query=red%20fox&page=1&per_page=12"
    /// );
    /// ```
    #[must_use]
    pub fn search_request(&self, query: &SearchQuery, page: Page, token: &RequestToken) -> SearchRequest {
        let _span = tracing::debug_span!("search_request", query = %query, page = page.get()).entered();

        let url = format!(
            "{}?query={}&page={}&per_page={}",
            self.endpoint,
            utf8_percent_encode(query.as_str(), QUERY_VALUE),
            page,
            self.per_page
        );

        let headers = BTreeMap::from([
            (
                "Authorization".to_string(),
                format!("Client-ID {}", self.access_key),
            ),
            ("Accept-Version".to_string(), "v1".to_string()),
        ]);

        let mut context = token.to_context();
        if let Some(trace) = TraceContext::from_current() {
            trace.insert_into(&mut context);
        }

        tracing::debug!(url = %url, generation = token.generation, "search request built");

        SearchRequest {
            url,
            headers,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(page: Page) -> RequestToken {
        RequestToken {
            generation: 3,
            page,
            query: "x".to_string(),
        }
    }

    #[test]
    fn blank_key_is_a_config_error() {
        assert!(matches!(ApiClient::new("  "), Err(ZsplashError::Config(_))));
    }

    #[test]
    fn credential_goes_in_header_not_url() {
        let client = ApiClient::new("secret").unwrap();
        let query = SearchQuery::parse("cats").unwrap();
        let page = Page::new(4).unwrap();
        let request = client.search_request(&query, page, &token(page));

        assert!(!request.url.contains("secret"));
        assert!(!request.url.contains("client_id"));
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Client-ID secret")
        );
        assert!(request.url.ends_with("?query=cats&page=4&per_page=12"));
    }

    #[test]
    fn query_is_percent_encoded() {
        let client = ApiClient::new("k").unwrap().with_endpoint("http://localhost/search");
        let query = SearchQuery::parse("café & crème/brûlée").unwrap();
        let request = client.search_request(&query, Page::FIRST, &token(Page::FIRST));
        assert_eq!(
            request.url,
            "http://localhost/search?query=caf%C3%A9%20%26%20cr%C3%A8me%2Fbr%C3%BBl%C3%A9e&page=1&per_page=12"
        );
    }

    #[test]
    fn context_round_trips_token() {
        let client = ApiClient::new("k").unwrap();
        let query = SearchQuery::parse("dogs").unwrap();
        let t = token(Page::FIRST);
        let request = client.search_request(&query, Page::FIRST, &t);
        assert_eq!(RequestToken::from_context(&request.context), Some(t));
    }

    #[test]
    fn debug_redacts_access_key() {
        let client = ApiClient::new("topsecret").unwrap();
        assert!(!format!("{client:?}").contains("topsecret"));
    }
}
