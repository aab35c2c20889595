//! Placeholder for an empty gallery.

use crate::ui::helpers::{center_offset, display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centred message at `row` and the dimmed subtitle below it.
///
/// Both lines are padded to `cols` so they overwrite any previous content.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = display_width(&message);
    let msg_padding = center_offset(msg_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = display_width(&subtitle);
    let sub_padding = center_offset(sub_len, cols);

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
