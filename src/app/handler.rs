//! Event handling and state transitions.
//!
//! The plugin shim translates host events (keys, web request results, timers)
//! into [`Event`] values. [`handle_event`] applies them to [`AppState`] and
//! returns whether a re-render is needed plus the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Navigation**: `MoveLeft`, `MoveRight`, `MoveUp`, `MoveDown`,
//!   `FocusSearch`, `Activate`, `CloseModal`
//! - **Commands**: `LoadMore`, `Retry`, `OpenInBrowser`, `CloseFocus`
//! - **System**: `SearchResponse`, `Tick`
//!
//! # Example
//!
//! ```rust
//! use zsplash::app::{handle_event, Action, AppState, Event};
//! use zsplash::api::ApiClient;
//! use zsplash::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default()).with_client(ApiClient::new("key")?);
//! for c in "fox".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), zsplash::ZsplashError>(())
//! ```

use super::modes::InputMode;
use super::session::Outcome;
use super::state::Notice;
use crate::api::{parse_search_response, RequestToken};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, ZsplashError};
use std::collections::BTreeMap;

/// Events produced by the plugin shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search input.
    Char(char),
    /// Deletes the last character of the search input.
    Backspace,
    /// Submits the search input as a query.
    Submit,
    /// Backs out one level: notice, then modal, then input focus.
    Escape,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Gives keyboard focus to the search input.
    FocusSearch,
    /// Enlarges the photo under the cursor.
    Activate,
    /// Closes the enlarged photo.
    CloseModal,

    /// Requests the next page of the current query.
    LoadMore,
    /// Re-issues a failed request.
    Retry,
    /// Opens the enlarged photo's page in the host browser.
    OpenInBrowser,
    /// Hides the plugin.
    CloseFocus,

    /// The host finished a web request.
    SearchResponse {
        status: u16,
        headers: BTreeMap<String, String>,
        body: Vec<u8>,
        /// Echoed request context carrying the [`RequestToken`].
        context: BTreeMap<String, String>,
    },

    /// A host timer armed by [`Action::ScheduleTimer`] fired.
    Tick,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI needs to be redrawn.
///
/// # Errors
///
/// Validation failures are turned into notices rather than errors. An error is
/// only returned for events that can never be valid, such as a search response
/// whose context does not carry a request token.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::Char(c) => {
            if state.selected_image.is_some() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Typing;
            state.input.push(*c);
            tracing::trace!(input = %state.input, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing || state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::Submit => Ok(submit(state)),
        Event::Escape => {
            if state.dismiss_notice() {
                return Ok((true, vec![]));
            }
            if state.close_modal() {
                return Ok((true, vec![]));
            }
            if state.input_mode == InputMode::Typing && !state.session.results().is_empty() {
                state.input_mode = InputMode::Browsing;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::MoveLeft => Ok((browse(state, -1, 0), vec![])),
        Event::MoveRight => Ok((browse(state, 1, 0), vec![])),
        Event::MoveUp => Ok((browse(state, 0, -1), vec![])),
        Event::MoveDown => Ok((browse(state, 0, 1), vec![])),
        Event::FocusSearch => {
            if state.input_mode == InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::Activate => {
            let opened = state.open_modal();
            if opened {
                tracing::debug!(index = state.cursor, "photo enlarged");
            }
            Ok((opened, vec![]))
        }
        Event::CloseModal => Ok((state.close_modal(), vec![])),
        Event::LoadMore => {
            let Some(token) = state.session.load_more() else {
                return Ok((false, vec![]));
            };
            Ok((true, state.fetch_action(&token).into_iter().collect()))
        }
        Event::Retry => {
            let Some(token) = state.session.retry() else {
                return Ok((false, vec![]));
            };
            Ok((true, state.fetch_action(&token).into_iter().collect()))
        }
        Event::OpenInBrowser => {
            let Some(photo) = state.selected_photo() else {
                return Ok((false, vec![]));
            };
            let url = photo.browser_url().to_string();
            tracing::debug!(url = %url, "opening photo in browser");
            Ok((false, vec![Action::OpenInBrowser { url }]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchResponse {
            status,
            headers,
            body,
            context,
        } => {
            let token = RequestToken::from_context(context).ok_or_else(|| {
                ZsplashError::Transport("web request result without a request token".to_string())
            })?;
            let outcome = parse_search_response(*status, headers, body);
            Ok(apply(state, &token, outcome))
        }
        Event::Tick => Ok((state.tick(), vec![])),
    }
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.client.is_none() {
        tracing::warn!("search submitted without an access key");
        return (true, vec![]);
    }

    match state.session.submit_query(&state.input) {
        Ok(Some(token)) => {
            state.notice = None;
            state.selected_image = None;
            state.cursor = 0;
            (true, state.fetch_action(&token).into_iter().collect())
        }
        Ok(None) => (false, vec![]),
        Err(err) if err.is_transient() => {
            let action = state.show_notice(Notice::Validation(err.user_message()));
            (true, vec![action])
        }
        Err(err) => {
            tracing::warn!(error = %err, "query rejected");
            (false, vec![])
        }
    }
}

fn browse(state: &mut AppState, dx: isize, dy: isize) -> bool {
    if state.selected_image.is_some() {
        return false;
    }
    // The first move out of the search input only shifts focus.
    if state.input_mode != InputMode::Browsing {
        state.input_mode = InputMode::Browsing;
        return true;
    }
    state.move_cursor(dx, dy)
}

fn apply(
    state: &mut AppState,
    token: &RequestToken,
    outcome: Result<crate::api::ResultPage>,
) -> (bool, Vec<Action>) {
    match state.session.apply_response(token, outcome) {
        Outcome::Stale => (false, vec![]),
        Outcome::Applied { .. } | Outcome::Failed => {
            state.clamp_cursor();
            (true, vec![])
        }
        Outcome::Empty => {
            let query = state
                .session
                .query()
                .map(ToString::to_string)
                .unwrap_or_default();
            state.clamp_cursor();
            let action = state.show_notice(Notice::NoResults(query));
            (true, vec![action])
        }
    }
}

/// Event name without payload, so response bodies stay out of span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::SearchResponse { status, .. } => write!(f, "SearchResponse({status})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default()).with_client(ApiClient::new("key").unwrap())
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn blank_submit_shows_notice_and_arms_timer() {
        let mut state = state();
        type_text(&mut state, "   ");
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 3 }]);
        assert_eq!(
            state.notice.as_ref().map(|n| n.notice.message()),
            Some("Please enter a search term!".to_string())
        );
        assert_eq!(state.session.generation(), 0);
    }

    #[test]
    fn submit_without_client_issues_nothing() {
        let mut state = AppState::new(Theme::default());
        type_text(&mut state, "fox");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(actions.is_empty());
        assert!(!state.session.is_loading());
    }

    #[test]
    fn escape_backs_out_one_level() {
        let mut state = state();
        type_text(&mut state, " ");
        handle_event(&mut state, &Event::Submit).unwrap();
        assert!(state.notice.is_some());

        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(render);
        assert!(state.notice.is_none());
        // Nothing loaded, so focus stays on the input.
        let (render, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!render);
        assert_eq!(state.input_mode, InputMode::Typing);
    }

    #[test]
    fn response_without_token_is_an_error() {
        let mut state = state();
        let event = Event::SearchResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: b"{}".to_vec(),
            context: BTreeMap::new(),
        };
        assert!(handle_event(&mut state, &event).is_err());
    }

    #[test]
    fn open_in_browser_requires_modal() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn event_kind_hides_body() {
        let event = Event::SearchResponse {
            status: 503,
            headers: BTreeMap::new(),
            body: b"secret".to_vec(),
            context: BTreeMap::new(),
        };
        assert_eq!(format!("{:?}", EventKind(&event)), "SearchResponse(503)");
    }
}
