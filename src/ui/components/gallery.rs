//! Result grid.
//!
//! Each tile occupies [`TILE_HEIGHT`](crate::app::state::TILE_HEIGHT) lines:
//!
//! ```text
//! ██ #7
//! Red fox in the snow
//! https://images.unsplash.com/…
//! ```
//!
//! The swatch is painted in the photo's dominant colour. The focused tile is
//! drawn with the selection colours.

use super::clear_row;
use crate::app::state::TILE_HEIGHT;
use crate::ui::helpers::{center_offset, display_width, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GalleryView, Tile};

const LOAD_MORE_HINT: &str = "── m: load more ──";

/// Renders the grid from `row` down to (not including) `limit`.
///
/// # Parameters
///
/// * `row` - First row of the gallery area (1-indexed)
/// * `limit` - First row the gallery must not touch, usually the load more hint
/// * `gallery` - Windowed grid computed by the view model
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Layout
///
/// ```text
///   ▲ 3 more                       (blank when at the top)
/// [tile][tile][tile]               TILE_HEIGHT lines per grid row
/// [tile][tile][tile]
///   ▼ 5 more                       (only when rows are hidden below)
/// [blank rows up to limit]
/// ```
///
/// Grid rows that would cross `limit` are skipped rather than clipped, so a
/// short terminal shows fewer complete rows. Every row up to `limit` is
/// written, which clears leftovers from a previous, taller frame.
pub fn render_gallery(row: usize, limit: usize, gallery: &GalleryView, theme: &Theme, cols: usize) {
    let mut current = row;

    if gallery.rows_above > 0 {
        print_scroll_marker(current, &format!("▲ {} more", gallery.rows_above), theme, cols);
    } else {
        clear_row(current, cols);
    }
    current += 1;

    for grid_row in &gallery.rows {
        if current + TILE_HEIGHT > limit {
            break;
        }
        for (line, lines_row) in (current..current + TILE_HEIGHT).enumerate() {
            clear_row(lines_row, cols);
            for (column, tile) in grid_row.iter().enumerate() {
                position_cursor(lines_row, 1 + column * gallery.tile_width);
                render_tile_line(tile, line, gallery.tile_width - 2, theme);
            }
        }
        current += TILE_HEIGHT;
    }

    if gallery.rows_below > 0 && current < limit {
        print_scroll_marker(current, &format!("▼ {} more", gallery.rows_below), theme, cols);
        current += 1;
    }

    while current < limit {
        clear_row(current, cols);
        current += 1;
    }
}

fn render_tile_line(tile: &Tile, line: usize, width: usize, theme: &Theme) {
    let (fg, bg) = if tile.is_selected {
        (
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg),
        )
    } else {
        (Theme::fg(&theme.colors.text_normal), String::new())
    };

    match line {
        0 => {
            let swatch = tile
                .swatch
                .as_deref()
                .map_or_else(|| Theme::fg(&theme.colors.text_dim), Theme::fg);
            let label = format!(" #{}", tile.number);
            print!("{swatch}██{}{fg}{bg}", Theme::reset());
            print!("{}", pad_right(&label, width.saturating_sub(2)));
        }
        1 => print!("{fg}{bg}{}{}", Theme::bold(), pad_right(&tile.caption, width)),
        2 => {
            let url_fg = if tile.is_selected {
                fg
            } else {
                Theme::fg(&theme.colors.text_dim)
            };
            print!("{url_fg}{bg}{}", pad_right(&tile.thumbnail_url, width));
        }
        _ => {}
    }
    print!("{}", Theme::reset());
}

fn print_scroll_marker(row: usize, text: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", pad_right(&format!("  {text}"), cols));
    print!("{}", Theme::reset());
}

/// Renders the load more hint centred on `row`, or blanks the row.
///
/// `visible` comes from the view model and is only true while another page
/// exists and no request is in flight.
pub fn render_load_more(row: usize, visible: bool, theme: &Theme, cols: usize) {
    if !visible {
        clear_row(row, cols);
        return;
    }
    let padding = center_offset(display_width(LOAD_MORE_HINT), cols);
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.loading_fg));
    print!("{}", pad_right(&format!("{}{LOAD_MORE_HINT}", " ".repeat(padding)), cols));
    print!("{}", Theme::reset());
}
