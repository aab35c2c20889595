//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model for the given size and hands it to the layout.
/// Output is positioned absolutely, so nothing needs clearing first.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Example
///
/// ```rust
/// use zsplash::ui::{render, Theme};
/// use zsplash::AppState;
///
/// let state = AppState::new(Theme::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::debug_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, rows, cols);
}
