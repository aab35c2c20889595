//! Search input box.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin around the box.
const SEARCH_BOX_MARGIN: usize = 2;

const PROMPT: &str = " Search: ";

/// Renders the 3-line input box at `row` and returns `row + 3`.
///
/// ```text
///   ┌──────────────────────┐
///   │ Search: red fox█     │
///   └──────────────────────┘
/// ```
///
/// The border uses `search_bar_border` while focused and `border` otherwise.
/// Long input scrolls so the caret stays visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    // Room for prompt and caret.
    let room = inner_width.saturating_sub(display_width(PROMPT) + 1);
    let skip = search.cursor.saturating_sub(room);
    let visible: String = search.input.chars().skip(skip).take(room).collect();
    let caret = if search.focused { "█" } else { " " };
    let used = display_width(PROMPT) + display_width(&visible) + 1;

    position_cursor(row + 1, 1);
    print!("{margin}{}│", Theme::fg(border));
    print!("{}{PROMPT}", Theme::fg(&theme.colors.text_dim));
    print!("{}{visible}{caret}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
