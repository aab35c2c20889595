//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to the host. It returns
//! [`Action`] values and the plugin shim in `main.rs` executes them in order.

use crate::api::SearchRequest;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one host web request for a page of search results.
    ///
    /// The request's context map comes back with the response and is turned
    /// into [`Event::SearchResponse`](super::Event::SearchResponse).
    Fetch(SearchRequest),

    /// Opens `url` with the host's default opener.
    OpenInBrowser {
        /// Photo page or image URL.
        url: String,
    },

    /// Arms a host timer that fires [`Event::Tick`](super::Event::Tick).
    ///
    /// Used to expire transient notices.
    ScheduleTimer {
        /// Delay in seconds.
        seconds: u32,
    },
}
