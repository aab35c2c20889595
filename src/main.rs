//! Zellij plugin wrapper and entry point.
//!
//! This is the thin layer between the zsplash library and the Zellij host. It
//! maps host events to [`Event`]s, feeds them to [`handle_event`] and executes
//! the returned [`Action`]s with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess` (search) and `RunCommands` (browser)
//! 3. **Subscribe**: `Key`, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 4. **Update**: translate, handle, execute actions
//! 5. **Render**: record the viewport, draw the view model
//!
//! # Event Mapping
//!
//! - `Key` → input, navigation or command events depending on focus
//! - `WebRequestResult` → `Event::SearchResponse` (only for zsplash requests)
//! - `Timer` → `Event::Tick`
//!
//! # Keybindings
//!
//! Typing (search input focused):
//! - characters: edit query
//! - `Enter`: search
//! - `Esc`/`Down`: move focus to the gallery
//!
//! Browsing (gallery focused):
//! - `h`/`j`/`k`/`l`, arrows: move
//! - `Enter`: enlarge photo
//! - `m`: load more
//! - `r`: retry failed request
//! - `/`: back to the search input
//! - `q`: close plugin
//!
//! Modal:
//! - `o`: open in browser
//! - `Esc`/`q`/`Enter`: close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zsplash::api::token::KIND_KEY;
use zsplash::observability::TraceContext;
use zsplash::{handle_event, Action, Config, Event, InputMode};

/// Command used to open URLs on the host.
const OPENER: &str = "xdg-open";

register_plugin!(State);

struct State {
    app: zsplash::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zsplash::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zsplash::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");

        self.app = zsplash::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Responses continue the trace of the span that issued the request.
        let _remote_parent = match &event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                TraceContext::from_map(context).and_then(|ctx| ctx.attach())
            }
            _ => None,
        };

        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                if !context.contains_key(KIND_KEY) {
                    tracing::debug!("ignoring web request result without zsplash context");
                    return false;
                }
                Event::SearchResponse {
                    status,
                    headers,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                match status {
                    PermissionStatus::Granted => tracing::debug!("permissions granted"),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - searches will fail");
                    }
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        zsplash::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.selected_image.is_some() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseModal),
                BareKey::Char('o') => Some(Event::OpenInBrowser),
                _ => None,
            };
        }

        if !key.has_no_modifiers() && !key.has_modifiers(&[KeyModifier::Shift]) {
            return None;
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::MoveDown,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
                BareKey::Right | BareKey::Char('l') => Event::MoveRight,
                BareKey::Up | BareKey::Char('k') => Event::MoveUp,
                BareKey::Down | BareKey::Char('j') => Event::MoveDown,
                BareKey::Enter => Event::Activate,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('r') => Event::Retry,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Esc => Event::Escape,
                _ => return None,
            },
        })
    }

    #[tracing::instrument(level = "debug", skip(action))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, "issuing web request");
                web_request(
                    request.url.clone(),
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::OpenInBrowser { url } => {
                tracing::debug!(url = %url, opener = OPENER, "opening url");
                run_command(&[OPENER, url.as_str()], BTreeMap::new());
            }
            Action::ScheduleTimer { seconds } => {
                set_timeout(f64::from(*seconds));
            }
        }
    }
}
