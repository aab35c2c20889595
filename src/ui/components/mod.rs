//! Layout components.
//!
//! Each component prints its block at an absolute row and returns the next
//! free row.
//!
//! - [`header`]: title and search summary
//! - [`search`]: bordered input box
//! - [`status`]: loading, error or notice line
//! - [`gallery`]: result grid and the load more hint
//! - [`empty`]: placeholder when there is nothing to show
//! - [`modal`]: enlarged photo overlay
//! - [`footer`]: key hints

mod empty;
mod footer;
mod gallery;
mod header;
mod modal;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Draws a full-width separator and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Clears `row` to the terminal width.
fn clear_row(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
}

/// Renders the whole frame.
///
/// ```text
/// [blank]
/// [Header]
/// [Border]
/// [Search box, 3 lines]
/// [Status line]
/// [Gallery or empty state]
/// [Load more hint]
/// [Border]
/// [Footer]
/// ```
///
/// The modal, when open, is drawn last on top of the gallery.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut row = 2;

    row = header::render_header(row, &vm.header, theme, cols);
    row = render_border(row, &theme.colors.border, cols);
    row = search::render_search_bar(row, &vm.search_bar, theme, cols);
    row = status::render_status(row, vm.status.as_ref(), theme, cols);

    let footer_row = rows;
    let border_row = rows.saturating_sub(1);
    let hint_row = rows.saturating_sub(2);

    if let Some(gallery) = &vm.gallery {
        gallery::render_gallery(row, hint_row, gallery, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(row + 2, empty, theme, cols);
    }

    if hint_row > row {
        gallery::render_load_more(hint_row, vm.load_more, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(info) = &vm.modal {
        modal::render_modal(info, theme, rows, cols);
    }
}
