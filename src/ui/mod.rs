//! Terminal UI: view model, layout components and theming.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FooterInfo, GalleryView, HeaderInfo, ModalInfo, SearchBarInfo, StatusKind,
    StatusLine, Tile, UIViewModel,
};
