//! zsplash: an Unsplash photo search gallery for Zellij.
//!
//! zsplash is a terminal multiplexer plugin that provides:
//! - Photo search against the Unsplash `search/photos` API
//! - Paged results accumulated into a keyboard-navigable gallery
//! - An overlay with photo details and an "open in browser" shortcut
//! - Stale response suppression when queries change mid-flight

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions                          │
//! │  - Search session state machine                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                    ┌───────────────┐
//! │ UI Layer      │                    │ API Layer     │
//! │ (ui/)         │                    │ (api/)        │
//! │ - Rendering   │                    │ - Requests    │
//! │ - Theming     │                    │ - Decoding    │
//! └───────────────┘                    └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Photo, SearchQuery, Page, errors (domain/)       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, OTLP file export          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zsplash.wasm" {
//!         access_key "your-unsplash-access-key"
//!         theme "catppuccin-latte"
//!         notice_seconds "5"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! Without `access_key` the `UNSPLASH_ACCESS_KEY` environment variable is
//! used. With neither, the plugin shows a configuration error and never
//! issues a request.
//!
//! # Example
//!
//! ```rust
//! use zsplash::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     access_key: Some("demo-key".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! for c in "mountains".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! let Some(Action::Fetch(request)) = actions.first() else { panic!("no fetch") };
//! assert!(request.url.contains("query=mountains&page=1&per_page=12"));
//! # Ok::<(), zsplash::ZsplashError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Result, ZsplashError};
pub use ui::Theme;

use crate::api::ApiClient;
use crate::app::state::DEFAULT_NOTICE_SECONDS;
use std::collections::BTreeMap;

/// Environment variable consulted when `access_key` is not configured.
pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Plugin configuration, parsed once at load.
#[derive(Clone, Default)]
pub struct Config {
    /// Unsplash API access key.
    pub access_key: Option<String>,

    /// Search endpoint override, mainly for proxies and tests.
    pub endpoint: Option<String>,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    pub theme_name: Option<String>,

    /// Path to a TOML theme; wins over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `"debug"`.
    pub trace_level: Option<String>,

    /// Seconds before a transient notice disappears. `None` uses the default.
    pub notice_seconds: Option<u32>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("theme_name", &self.theme_name)
            .field("theme_file", &self.theme_file)
            .field("trace_level", &self.trace_level)
            .field("notice_seconds", &self.notice_seconds)
            .finish()
    }
}

impl Config {
    /// Parses the Zellij plugin configuration, falling back to
    /// [`ACCESS_KEY_ENV`] for the access key.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::from_sources(config, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_zellij`] with an injectable environment.
    ///
    /// Blank values count as absent.
    #[must_use]
    pub fn from_sources(
        config: &BTreeMap<String, String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_key = get("access_key").or_else(|| {
            env(ACCESS_KEY_ENV)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        });

        let notice_seconds = get("notice_seconds").and_then(|s| {
            s.parse::<u32>()
                .map_err(|e| tracing::debug!(value = %s, error = %e, "ignoring invalid notice_seconds"))
                .ok()
        });

        Self {
            access_key,
            endpoint: get("endpoint"),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
            notice_seconds,
        }
    }

    /// Builds the API client.
    ///
    /// # Errors
    ///
    /// Returns [`ZsplashError::Config`] when no access key is available.
    pub fn api_client(&self) -> Result<ApiClient> {
        let key = self.access_key.as_deref().ok_or_else(|| {
            ZsplashError::Config(format!(
                "No API access key: set `access_key` in the plugin config or {ACCESS_KEY_ENV}"
            ))
        })?;
        let client = ApiClient::new(key)?;
        Ok(match &self.endpoint {
            Some(endpoint) => client.with_endpoint(endpoint.clone()),
            None => client,
        })
    }

    /// Resolves the theme: `theme_file`, then `theme_name`, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            let path = infrastructure::expand_tilde(file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "using default theme"),
            }
        }
        if let Some(name) = &self.theme_name {
            match Theme::from_name(name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

/// Creates the application state described by `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let state = AppState::new(config.theme())
        .with_notice_seconds(config.notice_seconds.unwrap_or(DEFAULT_NOTICE_SECONDS));

    match config.api_client() {
        Ok(client) => {
            tracing::debug!(endpoint = %client.endpoint(), "api client ready");
            state.with_client(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "search disabled");
            state.with_config_error(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn config_key_wins_over_env() {
        let config = Config::from_sources(&map(&[("access_key", "from-config")]), |_| {
            Some("from-env".to_string())
        });
        assert_eq!(config.access_key.as_deref(), Some("from-config"));
    }

    #[test]
    fn env_fallback_and_blank_values() {
        let config = Config::from_sources(&map(&[("access_key", "  "), ("theme", "")]), |name| {
            (name == ACCESS_KEY_ENV).then(|| "from-env".to_string())
        });
        assert_eq!(config.access_key.as_deref(), Some("from-env"));
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn invalid_notice_seconds_is_ignored() {
        let config = Config::from_sources(&map(&[("notice_seconds", "soon")]), |_| None);
        assert_eq!(config.notice_seconds, None);
        let config = Config::from_sources(&map(&[("notice_seconds", "7")]), |_| None);
        assert_eq!(config.notice_seconds, Some(7));
    }

    #[test]
    fn missing_key_disables_search() {
        let state = initialize(&Config::default());
        assert!(state.client.is_none());
        assert!(state
            .config_error
            .as_deref()
            .is_some_and(|m| m.contains(ACCESS_KEY_ENV)));
    }

    #[test]
    fn endpoint_override() {
        let config = Config {
            access_key: Some("k".to_string()),
            endpoint: Some("http://localhost:8080/search".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_client().unwrap().endpoint(), "http://localhost:8080/search");
    }

    #[test]
    fn debug_redacts_key() {
        let config = Config {
            access_key: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }
}
