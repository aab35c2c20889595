//! Application layer: state, events and the actions they produce.
//!
//! ```text
//! Host event → Event → handle_event → AppState / SearchSession → Actions → Host call
//!                 ↑                                                 │
//!                 └──────────── WebRequestResult / Timer ───────────┘
//! ```
//!
//! - [`actions`]: side effects for the plugin shim
//! - [`handler`]: event dispatch
//! - [`modes`]: input focus
//! - [`session`]: search and pagination state machine
//! - [`state`]: UI state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use session::{Outcome, Phase, SearchSession};
pub use state::{AppState, Notice, SelectedImage};
