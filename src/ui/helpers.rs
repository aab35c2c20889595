//! Shared rendering utilities.
//!
//! Width calculations count `char`s, not bytes, so captions with accented
//! letters or `×` line up like plain ASCII ones.

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` is assumed to occupy.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
///
/// # Examples
///
/// ```
/// use zsplash::ui::helpers::truncate;
///
/// assert_eq!(truncate("mountain lake", 8), "mountai…");
/// assert_eq!(truncate("fox", 8), "fox");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Pads `text` with spaces on the right up to `width` characters.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let len = display_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centres `len` characters in `width`.
#[must_use]
pub const fn center_offset(len: usize, width: usize) -> usize {
    width.saturating_sub(len) / 2
}

/// Formats a count with thousands separators (`12,345`).
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Accepts `#rrggbb` or `rrggbb`; anything else yields `None`.
#[must_use]
pub fn normalize_hex(color: &str) -> Option<String> {
    let hex = color.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| format!("#{}", hex.to_ascii_lowercase()))
}
