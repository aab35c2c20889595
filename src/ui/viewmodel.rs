//! Renderable snapshot of the plugin state.
//!
//! [`UIViewModel`] is produced by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Everything in here is display-ready: captions
//! are already truncated, the grid is already windowed, and notices are already
//! resolved into a single status line.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// Loading indicator, inline error or transient notice. At most one is
    /// shown; loading wins over errors, errors over notices.
    pub status: Option<StatusLine>,

    /// Visible slice of the result grid. `None` when there are no results.
    pub gallery: Option<GalleryView>,

    /// Whether the "load more" hint is shown.
    pub load_more: bool,

    /// Placeholder shown instead of the gallery.
    pub empty_state: Option<EmptyState>,

    /// Enlarged photo overlay.
    pub modal: Option<ModalInfo>,

    pub footer: FooterInfo,
}

/// Title bar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Right-aligned summary such as `24 of 1,203`.
    pub summary: Option<String>,
}

/// Key hints for the bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current input buffer, not necessarily the submitted query.
    pub input: String,
    /// Caret position in characters.
    pub cursor: usize,
    /// Whether the input has keyboard focus.
    pub focused: bool,
}

/// Kind of message shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Notice,
}

/// One-line status message under the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// Windowed grid of result tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    /// Visible grid rows, each holding up to `columns` tiles.
    pub rows: Vec<Vec<Tile>>,
    pub columns: usize,
    /// Character width of one tile including its gutter.
    pub tile_width: usize,
    /// Number of grid rows scrolled out above the window.
    pub rows_above: usize,
    /// Number of grid rows left below the window.
    pub rows_below: usize,
}

/// A single thumbnail in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Position in the full result set (1-based, for display).
    pub number: usize,
    /// Dominant colour as `#rrggbb`, if the API provided one.
    pub swatch: Option<String>,
    /// Truncated description.
    pub caption: String,
    /// Truncated `small` URL.
    pub thumbnail_url: String,
    pub is_selected: bool,
}

/// Placeholder for an empty gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Details of the enlarged photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub caption: String,
    /// The `regular` URL the modal displays.
    pub image_url: String,
    pub swatch: Option<String>,
    pub photographer: Option<String>,
    pub dimensions: Option<String>,
    pub likes: Option<u64>,
    pub age: Option<String>,
    /// Where `o` sends the browser.
    pub link: String,
}
