//! Search session: query, pagination and the accumulated result set.
//!
//! [`SearchSession`] is the state machine behind every fetch the plugin makes.
//! It never performs I/O itself. Transitions hand out a [`RequestToken`] that
//! the caller turns into a host web request, and the response is fed back
//! through [`SearchSession::apply_response`] together with the same token.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ──load_more──▶ Loading
//!                     │                                      ▲
//!                     └──err──▶ Error ──load_more / retry────┘
//! ```
//!
//! Every transition into `Loading` bumps the generation counter. A response is
//! only applied if its token carries the current generation and page, so a
//! late answer to a superseded query cannot overwrite newer results.

use crate::api::{RequestToken, ResultPage};
use crate::domain::{Page, Photo, Result, SearchQuery};

/// Coarse lifecycle of the session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query submitted yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Success,
    /// The last request failed; the message is in [`SearchSession::error`].
    Error,
}

/// What [`SearchSession::apply_response`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Items were stored. `added` may be zero on a trailing page.
    Applied { added: usize },
    /// The first page came back with no items.
    Empty,
    /// The fetch failed and the error was recorded.
    Failed,
    /// The response belongs to a superseded request and was dropped.
    Stale,
}

/// Search and pagination state for the lifetime of the plugin.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: Option<SearchQuery>,
    page: Page,
    results: Vec<Photo>,
    total: u64,
    total_pages: u32,
    last_loaded: u32,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search for `text`.
    ///
    /// Returns `Ok(None)` when the trimmed text equals the current query, and
    /// `Ok(Some(token))` for the page-1 fetch otherwise. Pagination, results
    /// and the error are reset before the token is issued.
    ///
    /// # Errors
    ///
    /// Returns [`ZsplashError::Validation`](crate::domain::ZsplashError::Validation)
    /// for empty or whitespace-only text. The session is left untouched.
    pub fn submit_query(&mut self, text: &str) -> Result<Option<RequestToken>> {
        let query = SearchQuery::parse(text)?;

        if self.query.as_ref() == Some(&query) {
            tracing::debug!(query = %query, "query unchanged, not refetching");
            return Ok(None);
        }

        tracing::debug!(query = %query, "new search submitted");
        self.query = Some(query);
        self.results.clear();
        self.total = 0;
        self.total_pages = 0;
        self.last_loaded = 0;
        self.error = None;

        Ok(Some(self.begin_fetch(Page::FIRST)))
    }

    /// Requests the page after the last one loaded.
    ///
    /// Returns `None` while a request is in flight, before any query, or when
    /// every page has been loaded.
    pub fn load_more(&mut self) -> Option<RequestToken> {
        if !self.has_more() {
            tracing::debug!(
                loading = self.loading,
                last_loaded = self.last_loaded,
                total_pages = self.total_pages,
                "load more refused"
            );
            return None;
        }
        let page = self.next_page();
        Some(self.begin_fetch(page))
    }

    /// Re-issues the request that failed.
    ///
    /// Only valid in [`Phase::Error`]. A failed first page has no
    /// `total_pages` yet, so this is the only way to re-request it without
    /// changing the query.
    pub fn retry(&mut self) -> Option<RequestToken> {
        if self.phase() != Phase::Error {
            return None;
        }
        let page = self.next_page();
        tracing::debug!(page = page.get(), "retrying failed fetch");
        Some(self.begin_fetch(page))
    }

    /// Applies the outcome of the fetch identified by `token`.
    ///
    /// Responses for any generation or page other than the one in flight are
    /// dropped. On success page 1 replaces the result set and later pages
    /// append to it. On failure the result set is kept as is and the user
    /// facing message is stored.
    pub fn apply_response(&mut self, token: &RequestToken, outcome: Result<ResultPage>) -> Outcome {
        let _span = tracing::debug_span!(
            "apply_response",
            generation = token.generation,
            page = token.page.get()
        )
        .entered();

        if !self.loading || token.generation != self.generation || token.page != self.page {
            tracing::debug!(
                current_generation = self.generation,
                current_page = self.page.get(),
                query = %token.query,
                "dropping stale response"
            );
            return Outcome::Stale;
        }

        self.loading = false;

        match outcome {
            Ok(page) => {
                self.error = None;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.last_loaded = token.page.get();

                let added = page.items.len();
                if token.page.is_first() {
                    self.results = page.items;
                } else {
                    self.results.extend(page.items);
                }

                tracing::debug!(
                    added,
                    accumulated = self.results.len(),
                    total_pages = self.total_pages,
                    "results applied"
                );

                if added == 0 && token.page.is_first() {
                    Outcome::Empty
                } else {
                    Outcome::Applied { added }
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "fetch failed");
                self.error = Some(err.user_message());
                Outcome::Failed
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.query.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// `true` if another page exists and nothing is in flight.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.loading && self.query.is_some() && self.last_loaded < self.total_pages
    }

    #[must_use]
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// Page of the most recent request.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn results(&self) -> &[Photo] {
        &self.results
    }

    /// Total number of matches reported by the API.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn last_loaded(&self) -> u32 {
        self.last_loaded
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn next_page(&self) -> Page {
        Page::new(self.last_loaded).map_or(Page::FIRST, Page::next)
    }

    fn begin_fetch(&mut self, page: Page) -> RequestToken {
        self.generation += 1;
        self.page = page;
        self.loading = true;

        RequestToken {
            generation: self.generation,
            page,
            query: self
                .query
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZsplashError;

    fn page_of(start: usize, n: usize, total_pages: u32) -> ResultPage {
        ResultPage {
            items: (start..start + n)
                .map(|i| Photo::new(format!("p{i}"), format!("s{i}"), format!("r{i}")))
                .collect(),
            total: u64::from(total_pages) * 12,
            total_pages,
        }
    }

    #[test]
    fn starts_idle() {
        let session = SearchSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.has_more());
        assert_eq!(session.page(), Page::FIRST);
    }

    #[test]
    fn blank_query_is_rejected_without_side_effects() {
        let mut session = SearchSession::new();
        let err = session.submit_query("   ").unwrap_err();
        assert!(matches!(err, ZsplashError::Validation(_)));
        assert_eq!(session.generation(), 0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn submit_enters_loading_on_page_one() {
        let mut session = SearchSession::new();
        let token = session.submit_query(" fox ").unwrap().unwrap();
        assert_eq!(token.page, Page::FIRST);
        assert_eq!(token.query, "fox");
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.load_more().is_none());
    }

    #[test]
    fn trailing_empty_page_is_not_a_no_results_notice() {
        let mut session = SearchSession::new();
        let first = session.submit_query("fox").unwrap().unwrap();
        session.apply_response(&first, Ok(page_of(0, 12, 2)));

        let second = session.load_more().unwrap();
        let outcome = session.apply_response(&second, Ok(page_of(0, 0, 2)));
        assert_eq!(outcome, Outcome::Applied { added: 0 });
        assert_eq!(session.results().len(), 12);
    }

    #[test]
    fn empty_first_page_reports_empty() {
        let mut session = SearchSession::new();
        let token = session.submit_query("qwxz").unwrap().unwrap();
        assert_eq!(session.apply_response(&token, Ok(page_of(0, 0, 0))), Outcome::Empty);
        assert_eq!(session.phase(), Phase::Success);
        assert!(!session.has_more());
    }

    #[test]
    fn retry_only_after_failure() {
        let mut session = SearchSession::new();
        assert!(session.retry().is_none());

        let token = session.submit_query("fox").unwrap().unwrap();
        assert!(session.retry().is_none());

        let outcome = session.apply_response(
            &token,
            Err(ZsplashError::Transport("connection refused".to_string())),
        );
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(session.phase(), Phase::Error);

        let again = session.retry().unwrap();
        assert_eq!(again.page, Page::FIRST);
        assert!(again.generation > token.generation);
    }

    #[test]
    fn response_for_wrong_page_is_stale() {
        let mut session = SearchSession::new();
        let token = session.submit_query("fox").unwrap().unwrap();
        let wrong = RequestToken {
            page: Page::new(2).unwrap(),
            ..token
        };
        assert_eq!(session.apply_response(&wrong, Ok(page_of(0, 12, 5))), Outcome::Stale);
        assert!(session.is_loading());
    }

    #[test]
    fn duplicate_response_is_stale() {
        let mut session = SearchSession::new();
        let token = session.submit_query("fox").unwrap().unwrap();
        session.apply_response(&token, Ok(page_of(0, 12, 5)));
        assert_eq!(session.apply_response(&token, Ok(page_of(0, 12, 5))), Outcome::Stale);
        assert_eq!(session.results().len(), 12);
    }
}
