//! Status line under the search box.

use crate::ui::helpers::{pad_right, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders the status message (or a blank line) at `row` and returns `row + 1`.
///
/// # Parameters
///
/// * `row` - Row position (1-indexed)
/// * `status` - Resolved status line, `None` blanks the row
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Markers
///
/// ```text
///   ◌ Loading page 2…                 loading_fg
///   ✗ Search failed (HTTP 500): …     error_fg
///   ! Please enter a search term!     notice_fg
/// ```
///
/// Long messages are truncated with an ellipsis to the terminal width.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let (color, marker) = match status.kind {
        StatusKind::Loading => (&theme.colors.loading_fg, "◌"),
        StatusKind::Error => (&theme.colors.error_fg, "✗"),
        StatusKind::Notice => (&theme.colors.notice_fg, "!"),
    };
    let line = truncate(&format!("  {marker} {}", status.text), cols);

    print!("{}{}{}", Theme::fg(color), pad_right(&line, cols), Theme::reset());
    row + 1
}
