//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Rental Desk library
//! and the Zellij plugin system. It implements `ZellijPlugin`, turns host
//! events into library events and carries out the returned actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` for the rental API
//! 3. **Subscribe**: Register for Key, `WebRequestResult` and
//!    `PermissionRequestResult` events
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → navigation, command or text input events (see below)
//! - `WebRequestResult` → `Event::ApiResponse { status, body, context }`
//! - `PermissionRequestResult` → `Event::PermissionsResult { granted }`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//! - `Ctrl+q`: Close plugin
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Enter`: Open selected entry
//! - `Esc`: Go back
//! - `Tab`: Switch dashboard list or film search type
//! - `/`: Focus the search or filter input
//! - `1`/`2`/`3`: Dashboard, films, customers
//! - `n`/`Right`: Next page
//! - `p`/`Left`: Previous page
//! - `s`: Cycle page size
//! - `r`: Refresh
//! - `L` (shift): Log out
//! - `q`: Close plugin
//!
//! While typing (always on the sign-in screen):
//! - Printable keys: Type characters
//! - `Enter`: Submit
//! - `Esc`: Leave the input
//! - `Tab`/`Up`/`Down`: Switch login field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use rentaldesk::api::Method;
use rentaldesk::{handle_event, Action, AppState, Config, Event, InputMode, Screen};

register_plugin!(State);

/// Plugin state wrapper.
///
/// `app` stays empty only if the configured API URL cannot be used; the
/// pane then shows `load_error` instead of the application.
#[derive(Default)]
struct State {
    app: Option<AppState>,
    load_error: Option<String>,
}

impl ZellijPlugin for State {
    /// Parses configuration, creates the application state, requests web
    /// access and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        rentaldesk::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "parsed configuration");
        match rentaldesk::initialize(&config) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize plugin");
                self.load_error = Some(e.to_string());
            }
        }

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the host event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let Some(app) = self.app.as_mut() else {
            if let zellij_tile::prelude::Event::Key(key) = &event {
                if key.bare_key == BareKey::Char('q') || key.bare_key == BareKey::Esc {
                    hide_self();
                }
            }
            return false;
        };

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(app, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::ApiResponse { status, body, context }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => Event::PermissionsResult {
                granted: matches!(permissions, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        match &self.app {
            Some(app) => rentaldesk::ui::render(app, rows, cols),
            None => {
                let message = self.load_error.as_deref().unwrap_or("unknown error");
                println!("Rental Desk could not start: {message}");
                println!("Check the api_url setting and reload the plugin. Press q to close.");
            }
        }
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// The sign-in screen has no commands; every key edits the form there.
    fn map_key_event(app: &AppState, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        let typing = app.screen == Screen::Login || app.input_mode == InputMode::Typing;
        if typing {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                BareKey::Tab => Event::Tab,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Tab => Event::Tab,
            BareKey::Char('/') => Event::FocusInput,
            BareKey::Char('1') => Event::ShowDashboard,
            BareKey::Char('2') => Event::ShowFilms,
            BareKey::Char('3') => Event::ShowCustomers,
            BareKey::Right | BareKey::Char('n') => Event::NextPage,
            BareKey::Left | BareKey::Char('p') => Event::PrevPage,
            BareKey::Char('s') => Event::CyclePageSize,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('L') => Event::Logout,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `Request`: Issue the HTTP call through the host; the context map
    ///   comes back with the matching `WebRequestResult`
    ///
    /// The action itself stays out of the span; requests log target and
    /// generation only.
    #[tracing::instrument(level = "debug", skip(action))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request { call, context } => {
                let verb = match call.method {
                    Method::Get => HttpVerb::Get,
                    Method::Post => HttpVerb::Post,
                };
                tracing::debug!(url = %call.url, target = %context.target, generation = context.generation, "issuing web request");
                web_request(&call.url, verb, call.headers.clone(), call.body.clone(), context.to_map());
            }
        }
    }
}
