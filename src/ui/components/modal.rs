//! Enlarged photo overlay.

use crate::ui::helpers::{center_offset, format_count, pad_right, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MAX_WIDTH: usize = 76;

/// Draws a bordered box centred in the terminal with the photo details.
///
/// Drawn after every other component so it sits on top of the gallery.
/// Optional metadata rows are left out when the API did not send them, and
/// nothing is drawn when the terminal is too narrow for a usable box.
///
/// ```text
/// ╭──────────────────────────────╮
/// │ Red fox in the snow          │
/// │ ████████████████████████████ │
/// │                              │
/// │ Photographer  Ansel Adams    │
/// │ ...                          │
/// │ o: open in browser  Esc: close│
/// ╰──────────────────────────────╯
/// ```
pub fn render_modal(info: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_WIDTH);
    if width < 12 {
        return;
    }
    let inner = width - 4;

    let mut lines: Vec<(String, Style)> = vec![
        (truncate(&info.caption, inner), Style::Title),
        (String::new(), Style::Swatch),
        (String::new(), Style::Plain),
    ];
    let mut field = |label: &str, value: String| {
        lines.push((truncate(&format!("{label:<13}{value}"), inner), Style::Plain));
    };
    if let Some(name) = &info.photographer {
        field("Photographer", name.clone());
    }
    if let Some(size) = &info.dimensions {
        field("Size", size.clone());
    }
    if let Some(likes) = info.likes {
        field("Likes", format_count(likes));
    }
    if let Some(age) = &info.age {
        field("Published", age.clone());
    }
    field("Image", info.image_url.clone());
    field("Page", info.link.clone());
    lines.push((String::new(), Style::Plain));
    lines.push(("o: open in browser  Esc: close".to_string(), Style::Dim));

    let height = lines.len() + 2;
    let top = center_offset(height, rows).max(1) + 1;
    let left = center_offset(width, cols) + 1;
    let border = Theme::fg(&theme.colors.modal_border);

    position_cursor(top, left);
    print!("{border}╭{}╮{}", "─".repeat(width - 2), Theme::reset());

    for (offset, (text, style)) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│{} ", Theme::reset());
        match style {
            Style::Title => print!(
                "{}{}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.header_fg),
                pad_right(text, inner)
            ),
            Style::Swatch => {
                let color = info.swatch.as_deref().unwrap_or(&theme.colors.text_dim);
                print!("{}{}", Theme::fg(color), "█".repeat(inner));
            }
            Style::Dim => print!("{}{}", Theme::fg(&theme.colors.text_dim), pad_right(text, inner)),
            Style::Plain => print!("{}{}", Theme::fg(&theme.colors.text_normal), pad_right(text, inner)),
        }
        print!("{} {border}│{}", Theme::reset(), Theme::reset());
    }

    position_cursor(top + height - 1, left);
    print!("{border}╰{}╯{}", "─".repeat(width - 2), Theme::reset());
}

enum Style {
    Title,
    Swatch,
    Plain,
    Dim,
}
