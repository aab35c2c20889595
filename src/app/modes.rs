//! Input focus state.
//!
//! The plugin has two focus targets:
//! - **Typing**: keys edit the search input, Enter submits
//! - **Browsing**: keys move the cursor over the gallery, Enter opens the modal
//!
//! While the modal is open it captures every key regardless of the mode; see
//! [`AppState::selected_image`](super::AppState::selected_image).

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Editing the search query.
    ///
    /// Characters are inserted, Backspace deletes, Enter submits, Esc moves to
    /// the gallery (or dismisses a notice first).
    #[default]
    Typing,

    /// Navigating the result grid.
    ///
    /// h/j/k/l and arrows move, Enter enlarges, `m` loads more, `r` retries,
    /// `/` returns to the search input, `q` closes the plugin.
    Browsing,
}
