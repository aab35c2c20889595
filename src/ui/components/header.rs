//! Header bar: bold title on the left, search summary on the right.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns `row + 1`.
///
/// # Layout
///
/// ```text
///  zsplash                                  "fox"  24 of 1,204
/// ```
///
/// The summary is dropped entirely if it does not fit next to the title.
/// When the theme sets `header_bg` the whole row is filled with it.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = display_width(&title);

    let summary = header
        .summary
        .as_ref()
        .map(|s| format!("{s} "))
        .filter(|s| title_len + display_width(s) < cols)
        .unwrap_or_default();
    let gap = cols.saturating_sub(title_len + display_width(&summary));

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{title}{}", Theme::bold(), Theme::reset());

    print!("{}", Theme::fg(&theme.colors.text_dim));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{summary}", " ".repeat(gap));
    print!("{}", Theme::reset());
    row + 1
}
