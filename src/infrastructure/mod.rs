//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host filesystem under `/host`, so every path the plugin
//! touches on disk is resolved through here.

pub mod paths;

pub use paths::{ensure_data_dir, expand_tilde, get_data_dir};
