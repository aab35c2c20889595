//! Error types for the zsplash plugin.
//!
//! This module defines [`ZsplashError`], the single error type shared by the API
//! client, the search session and the plugin shell, plus the [`Result`] alias.
//! Errors fall in two families:
//!
//! - **Transient**: [`ZsplashError::Validation`] is reported as a dismissable
//!   notice and never stored in the session.
//! - **Persistent**: [`ZsplashError::Transport`] and [`ZsplashError::Response`]
//!   are kept as the session's inline error until the next successful fetch.

use thiserror::Error;

/// The main error type for zsplash operations.
///
/// # Examples
///
/// ```
/// use zsplash::ZsplashError;
///
/// let err = ZsplashError::Validation("Please enter a search term!".to_string());
/// assert!(err.is_transient());
/// assert_eq!(err.user_message(), "Please enter a search term!");
/// ```
#[derive(Debug, Error)]
pub enum ZsplashError {
    /// User input was rejected before any request was issued.
    ///
    /// Raised for empty or whitespace-only search queries.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The host could not complete the HTTP request (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status or a body that does not
    /// match the expected search response schema.
    #[error("Response error{}: {message}", status_suffix(.status))]
    Response {
        /// HTTP status code, if the failure is status related.
        status: Option<u16>,
        /// Description of what was wrong with the response.
        message: String,
    },

    /// Configuration is invalid or missing.
    ///
    /// Most notably raised when no API access key is available.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZsplashError {
    /// Builds a [`ZsplashError::Response`] for a malformed body.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Response {
            status: None,
            message: message.into(),
        }
    }

    /// Returns `true` for errors shown as a dismissable notice rather than
    /// persisted in the session.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Human-readable message suitable for the status line.
    ///
    /// Strips the category prefix used by `Display` for validation errors and
    /// maps fetch failures to short sentences.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Transport(msg) => format!("Network problem: {msg}"),
            Self::Response {
                status: Some(401), ..
            } => "The API rejected the access key (HTTP 401).".to_string(),
            Self::Response {
                status: Some(403), ..
            } => "The API refused the request, rate limit may be exhausted (HTTP 403).".to_string(),
            Self::Response {
                status: Some(status),
                message,
            } => format!("Search failed (HTTP {status}): {message}"),
            Self::Response {
                status: None,
                message,
            } => format!("Unexpected response from the API: {message}"),
            Self::Config(msg) => msg.clone(),
            Self::Theme(msg) => format!("Theme problem: {msg}"),
            Self::Io(e) => format!("I/O problem: {e}"),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// A specialized `Result` type for zsplash operations.
pub type Result<T> = std::result::Result<T, ZsplashError>;
