//! Colour themes and ANSI escape generation.
//!
//! Themes are TOML documents. Two are compiled in (`catppuccin-mocha`, the
//! default, and `catppuccin-latte`); any other file can be loaded with
//! [`Theme::from_file`].
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! error_fg = "#f38ba8"
//! notice_fg = "#f9e2af"
//! loading_fg = "#89dceb"
//! modal_border = "#cba6f7"
//! empty_state_fg = "#89b4fa"
//! ```

use crate::domain::{Result, ZsplashError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when nothing is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Colour scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colours for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focused tile foreground.
    pub selection_fg: String,
    /// Focused tile background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: URLs, footer, metadata labels.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Inline fetch errors and configuration problems.
    pub error_fg: String,
    /// Transient notices (validation, no results).
    pub notice_fg: String,
    pub loading_fg: String,

    pub modal_border: String,
    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a compiled-in theme by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zsplash::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZsplashError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ZsplashError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ZsplashError::Theme(format!("cannot parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// # Panics
    ///
    /// Panics if the compiled-in default theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}
