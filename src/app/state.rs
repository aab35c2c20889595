//! Application state and view model computation.
//!
//! [`AppState`] owns the [`SearchSession`] plus everything that only matters to
//! the terminal UI: the input buffer, the gallery cursor, the open modal, the
//! transient notice and the theme. The event handler is the only writer;
//! the renderer reads it through [`AppState::compute_viewmodel`].
//!
//! # Layout
//!
//! ```text
//! row 1      blank
//! row 2      header
//! row 3      border
//! rows 4-6   search box
//! row 7      status line
//! row 8      scroll marker
//! rows 9..   gallery (TILE_HEIGHT rows per grid row), scroll marker
//! rows-2     load more hint
//! rows-1     border
//! rows       footer
//! ```

use super::actions::Action;
use super::modes::InputMode;
use super::session::{Phase, SearchSession};
use crate::api::{ApiClient, RequestToken};
use crate::domain::Photo;
use crate::ui::helpers::{format_count, normalize_hex, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, GalleryView, HeaderInfo, ModalInfo, SearchBarInfo, StatusKind,
    StatusLine, Tile, UIViewModel,
};
use chrono::{DateTime, Utc};

/// Character width of one gallery tile, gutter included.
pub const TILE_WIDTH: usize = 28;

/// Terminal rows per gallery row: marker line, caption, URL, spacer.
pub const TILE_HEIGHT: usize = 4;

/// Rows used by everything except the tiles, scroll markers included.
const CHROME_ROWS: usize = 12;

/// Default lifetime of a transient notice, in seconds.
pub const DEFAULT_NOTICE_SECONDS: u32 = 3;

const MISSING_KEY_MESSAGE: &str =
    "No API access key: set `access_key` in the plugin config or UNSPLASH_ACCESS_KEY";

/// A dismissable message that is never stored in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Input was rejected before a request was made.
    Validation(String),
    /// The query returned nothing.
    NoResults(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NoResults(query) => format!("No photos found for \"{query}\""),
        }
    }
}

/// A notice plus the timer tick that removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotice {
    pub notice: Notice,
    pub expires_on_tick: u64,
}

/// The photo shown in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// The photo's `regular` URL.
    pub url: String,
    /// Index into the session's result set.
    pub index: usize,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SearchSession,

    /// `None` when no access key is configured; no request is ever built then.
    pub client: Option<ApiClient>,
    /// Shown permanently on the status line when set.
    pub config_error: Option<String>,

    pub input_mode: InputMode,
    /// Search input buffer. Only becomes the session query on submit.
    pub input: String,

    /// Gallery cursor as an index into the result set.
    pub cursor: usize,
    pub selected_image: Option<SelectedImage>,

    pub notice: Option<ActiveNotice>,
    pub notice_seconds: u32,
    /// Timers armed so far; each notice expires on the tick matching the
    /// count at the time it was shown.
    pub timers_scheduled: u64,
    /// Timer events received so far.
    pub ticks: u64,

    /// Last rendered size as `(rows, cols)`.
    pub viewport: (usize, usize),
    pub theme: Theme,
}

impl AppState {
    /// Creates a state without a client. Every submit is refused until one is
    /// attached with [`AppState::with_client`].
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            session: SearchSession::new(),
            client: None,
            config_error: Some(MISSING_KEY_MESSAGE.to_string()),
            input_mode: InputMode::Typing,
            input: String::new(),
            cursor: 0,
            selected_image: None,
            notice: None,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            timers_scheduled: 0,
            ticks: 0,
            viewport: (24, 80),
            theme,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: ApiClient) -> Self {
        self.client = Some(client);
        self.config_error = None;
        self
    }

    #[must_use]
    pub fn with_config_error(mut self, message: impl Into<String>) -> Self {
        self.client = None;
        self.config_error = Some(message.into());
        self
    }

    #[must_use]
    pub const fn with_notice_seconds(mut self, seconds: u32) -> Self {
        self.notice_seconds = seconds;
        self
    }

    /// Records the terminal size so navigation knows the grid width.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Number of tiles per gallery row for the current viewport.
    #[must_use]
    pub const fn grid_columns(&self) -> usize {
        grid_columns(self.viewport.1)
    }

    /// Turns a session token into a fetch for the shim.
    #[must_use]
    pub fn fetch_action(&self, token: &RequestToken) -> Option<Action> {
        let client = self.client.as_ref()?;
        let query = self.session.query()?;
        Some(Action::Fetch(client.search_request(query, token.page, token)))
    }

    /// Shows `notice` and arms the timer that will clear it.
    pub fn show_notice(&mut self, notice: Notice) -> Action {
        self.timers_scheduled += 1;
        tracing::debug!(notice = ?notice, expires_on_tick = self.timers_scheduled, "notice shown");
        self.notice = Some(ActiveNotice {
            notice,
            expires_on_tick: self.timers_scheduled,
        });
        Action::ScheduleTimer {
            seconds: self.notice_seconds,
        }
    }

    /// Advances the timer count; returns `true` if a notice was cleared.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|n| n.expires_on_tick <= self.ticks);
        if expired {
            self.notice = None;
        }
        expired
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    #[must_use]
    pub fn photo_under_cursor(&self) -> Option<&Photo> {
        self.session.results().get(self.cursor)
    }

    /// Photo currently enlarged in the modal.
    #[must_use]
    pub fn selected_photo(&self) -> Option<&Photo> {
        let selected = self.selected_image.as_ref()?;
        self.session.results().get(selected.index)
    }

    /// Enlarges the photo under the cursor.
    pub fn open_modal(&mut self) -> bool {
        let Some(photo) = self.photo_under_cursor() else {
            return false;
        };
        self.selected_image = Some(SelectedImage {
            url: photo.urls.regular.clone(),
            index: self.cursor,
        });
        true
    }

    pub fn close_modal(&mut self) -> bool {
        self.selected_image.take().is_some()
    }

    /// Moves the gallery cursor by `dx` tiles and `dy` grid rows.
    ///
    /// Horizontal moves wrap across rows; vertical moves stop at the edges.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) -> bool {
        let len = self.session.results().len();
        if len == 0 {
            return false;
        }
        let columns = self.grid_columns().max(1);
        let step = dx + dy * columns as isize;

        let target = self.cursor as isize + step;
        let target = if dy == 0 {
            target.clamp(0, len as isize - 1)
        } else if (0..len as isize).contains(&target) {
            target
        } else {
            self.cursor as isize
        };

        let moved = target as usize != self.cursor;
        self.cursor = target as usize;
        moved
    }

    /// Keeps the cursor inside the result set after it shrinks.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.session.results().len().saturating_sub(1));
    }

    /// Computes the view model for a `rows` x `cols` terminal.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// Same as [`AppState::compute_viewmodel`] with an explicit clock, used for
    /// the photo age in the modal.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let _span = tracing::debug_span!(
            "compute_viewmodel",
            rows,
            cols,
            results = self.session.results().len()
        )
        .entered();

        let gallery = self.compute_gallery(rows, cols);
        let empty_state = if gallery.is_none() {
            self.compute_empty_state()
        } else {
            None
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                input: self.input.clone(),
                cursor: self.input.chars().count(),
                focused: self.input_mode == InputMode::Typing && self.selected_image.is_none(),
            },
            status: self.compute_status(),
            gallery,
            load_more: self.config_error.is_none() && self.session.has_more(),
            empty_state,
            modal: self.compute_modal(now),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let summary = self.session.query().map(|query| {
            format!(
                "\"{}\"  {} of {}",
                truncate(query.as_str(), 24),
                format_count(self.session.results().len() as u64),
                format_count(self.session.total())
            )
        });
        HeaderInfo {
            title: " zsplash ".to_string(),
            summary,
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(message) = &self.config_error {
            return Some(StatusLine {
                kind: StatusKind::Error,
                text: message.clone(),
            });
        }
        // Notices expire on their own and cover loading or errors until then.
        if let Some(active) = &self.notice {
            return Some(StatusLine {
                kind: StatusKind::Notice,
                text: active.notice.message(),
            });
        }
        if self.session.is_loading() {
            let text = if self.session.page().is_first() {
                "Loading…".to_string()
            } else {
                format!("Loading page {}…", self.session.page())
            };
            return Some(StatusLine {
                kind: StatusKind::Loading,
                text,
            });
        }
        self.session.error().map(|error| StatusLine {
            kind: StatusKind::Error,
            text: error.to_string(),
        })
    }

    /// Windows the result grid around the cursor row.
    fn compute_gallery(&self, rows: usize, cols: usize) -> Option<GalleryView> {
        let results = self.session.results();
        if results.is_empty() {
            return None;
        }

        let columns = grid_columns(cols);
        let inner_width = TILE_WIDTH - 2;
        let total_rows = (results.len() + columns - 1) / columns;
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / TILE_HEIGHT).max(1);
        let cursor_row = self.cursor / columns;

        let mut start = cursor_row.saturating_sub(visible_rows / 2);
        if start + visible_rows > total_rows {
            start = total_rows.saturating_sub(visible_rows);
        }
        let end = (start + visible_rows).min(total_rows);

        let rows = (start..end)
            .map(|grid_row| {
                let first = grid_row * columns;
                let last = (first + columns).min(results.len());
                results[first..last]
                    .iter()
                    .enumerate()
                    .map(|(offset, photo)| {
                        let index = first + offset;
                        Tile {
                            number: index + 1,
                            swatch: photo.color.as_deref().and_then(normalize_hex),
                            caption: truncate(&photo.caption(), inner_width),
                            thumbnail_url: truncate(&photo.urls.small, inner_width),
                            is_selected: index == self.cursor
                                && self.input_mode == InputMode::Browsing,
                        }
                    })
                    .collect()
            })
            .collect();

        Some(GalleryView {
            rows,
            columns,
            tile_width: TILE_WIDTH,
            rows_above: start,
            rows_below: total_rows - end,
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.config_error.is_some() {
            return Some(EmptyState {
                message: "Not configured".to_string(),
                subtitle: "Add an Unsplash access key and reload the plugin".to_string(),
            });
        }
        match (self.session.phase(), self.session.query()) {
            (Phase::Idle, _) => Some(EmptyState {
                message: "Search Unsplash".to_string(),
                subtitle: "Type a query and press Enter".to_string(),
            }),
            (Phase::Success, Some(query)) => Some(EmptyState {
                message: format!("No photos for \"{}\"", truncate(query.as_str(), 32)),
                subtitle: "Try a different search term".to_string(),
            }),
            _ => None,
        }
    }

    fn compute_modal(&self, now: DateTime<Utc>) -> Option<ModalInfo> {
        let selected = self.selected_image.as_ref()?;
        let photo = self.selected_photo()?;
        Some(ModalInfo {
            caption: photo.caption(),
            image_url: selected.url.clone(),
            swatch: photo.color.as_deref().and_then(normalize_hex),
            photographer: photo.user.as_ref().and_then(|u| u.display_name()),
            dimensions: photo.dimensions(),
            likes: photo.likes,
            age: photo.time_ago(now),
            link: photo.browser_url().to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selected_image.is_some() {
            "Esc/q/Enter: close  o: open in browser".to_string()
        } else {
            match self.input_mode {
                InputMode::Typing => "Enter: search  Esc: results  Type to edit query".to_string(),
                InputMode::Browsing => {
                    let mut hints = vec!["h/j/k/l: move", "Enter: view"];
                    if self.session.has_more() {
                        hints.push("m: load more");
                    }
                    if self.session.phase() == Phase::Error {
                        hints.push("r: retry");
                    }
                    hints.extend(["/: search", "q: quit"]);
                    hints.join("  ")
                }
            }
        };
        FooterInfo { keybindings }
    }
}

const fn grid_columns(cols: usize) -> usize {
    let columns = cols.saturating_sub(2) / TILE_WIDTH;
    if columns == 0 {
        1
    } else {
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResultPage;
    use crate::domain::{Photographer, ZsplashError};
    use chrono::TimeZone;

    fn photos(n: usize) -> Vec<Photo> {
        (0..n)
            .map(|i| Photo::new(format!("id{i}"), format!("https://s/{i}"), format!("https://r/{i}")))
            .collect()
    }

    fn loaded_state(n: usize, total_pages: u32) -> AppState {
        let mut state = AppState::new(Theme::default()).with_client(ApiClient::new("key").unwrap());
        let token = state.session.submit_query("fox").unwrap().unwrap();
        state.session.apply_response(
            &token,
            Ok(ResultPage {
                items: photos(n),
                total: 100,
                total_pages,
            }),
        );
        state.input_mode = InputMode::Browsing;
        state
    }

    #[test]
    fn missing_key_is_reported() {
        let vm = AppState::new(Theme::default()).compute_viewmodel(24, 80);
        let status = vm.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("UNSPLASH_ACCESS_KEY"));
        assert!(!vm.load_more);
    }

    #[test]
    fn idle_shows_placeholder() {
        let state = AppState::new(Theme::default()).with_client(ApiClient::new("key").unwrap());
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.status.is_none());
        assert_eq!(vm.empty_state.unwrap().message, "Search Unsplash");
        assert!(vm.search_bar.focused);
    }

    #[test]
    fn grid_is_windowed_around_cursor() {
        let mut state = loaded_state(24, 2);
        // 80 cols fit 2 columns, 30 rows fit 4 of the 12 grid rows
        state.set_viewport(30, 80);
        state.cursor = 23;
        let gallery = state.compute_viewmodel(30, 80).gallery.unwrap();

        assert_eq!(gallery.columns, 2);
        assert_eq!(gallery.rows.len(), 4);
        assert_eq!(gallery.rows_above, 8);
        assert_eq!(gallery.rows_below, 0);
        let last = gallery.rows.last().unwrap().last().unwrap();
        assert_eq!(last.number, 24);
        assert!(last.is_selected);
    }

    #[test]
    fn vertical_moves_stop_at_edges() {
        let mut state = loaded_state(5, 1);
        state.set_viewport(24, 90); // 3 columns
        assert!(!state.move_cursor(0, -1));
        assert!(state.move_cursor(0, 1));
        assert_eq!(state.cursor, 3);
        assert!(!state.move_cursor(0, 1));
        assert!(state.move_cursor(1, 0));
        assert_eq!(state.cursor, 4);
        assert!(!state.move_cursor(1, 0));
    }

    #[test]
    fn modal_carries_metadata() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut items = photos(3);
        items[1].user = Some(Photographer {
            name: Some("Ansel".to_string()),
            username: Some("ansel".to_string()),
        });
        items[1].width = Some(4000);
        items[1].height = Some(3000);
        items[1].likes = Some(42);
        items[1].created_at = Some(created);

        let mut state = AppState::new(Theme::default()).with_client(ApiClient::new("key").unwrap());
        let token = state.session.submit_query("lake").unwrap().unwrap();
        state.session.apply_response(
            &token,
            Ok(ResultPage {
                items,
                total: 3,
                total_pages: 1,
            }),
        );
        state.cursor = 1;
        assert!(state.open_modal());

        let now = created + chrono::Duration::days(3);
        let modal = state.compute_viewmodel_at(24, 80, now).modal.unwrap();
        assert_eq!(modal.image_url, "https://r/1");
        assert_eq!(modal.photographer.as_deref(), Some("Ansel"));
        assert_eq!(modal.dimensions.as_deref(), Some("4000×3000"));
        assert_eq!(modal.likes, Some(42));
        assert_eq!(modal.age.as_deref(), Some("3d ago"));

        assert!(state.close_modal());
        assert!(state.compute_viewmodel(24, 80).modal.is_none());
    }

    #[test]
    fn notice_expires_on_its_own_tick() {
        let mut state = AppState::new(Theme::default());
        state.show_notice(Notice::Validation("first".to_string()));
        state.show_notice(Notice::Validation("second".to_string()));

        // The first timer must not clear the newer notice.
        assert!(!state.tick());
        assert!(state.notice.is_some());
        assert!(state.tick());
        assert!(state.notice.is_none());
    }

    #[test]
    fn notice_covers_fetch_error_until_it_expires() {
        let mut state = AppState::new(Theme::default()).with_client(ApiClient::new("key").unwrap());
        let token = state.session.submit_query("fox").unwrap().unwrap();
        state.session.apply_response(
            &token,
            Err(ZsplashError::Transport("offline".to_string())),
        );
        state.show_notice(Notice::Validation("Please enter a search term!".to_string()));

        let status = state.compute_viewmodel(40, 120).status.unwrap();
        assert_eq!(status.kind, StatusKind::Notice);
        assert_eq!(status.text, "Please enter a search term!");

        state.tick();
        let status = state.compute_viewmodel(40, 120).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
    }
}
