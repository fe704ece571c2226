//! Rental Desk: a Zellij plugin for film-rental store staff.
//!
//! Staff sign in against the store's REST API and can then:
//! - See the top rented films and top actors on a dashboard
//! - Search the film catalog by title, actor or genre
//! - Browse, filter and page through customers
//! - Drill into film, actor and customer details

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point, host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Screens, events,
//! │                                                     │    actions, view models
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Collection    │   │ API Layer     │
//! │ (ui/)         │   │ (collection/) │   │ (api/)        │
//! │ - Rendering   │   │ - Load state  │   │ - Requests    │
//! │ - Theming     │   │ - Filtering   │   │ - Decoding    │
//! │ - Components  │   │ - Pagination  │   │ - Correlation │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Session (session.rs)          │  ← Records, errors,
//! │                                                     │    signed-in staff
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the host. The shim turns Zellij events into
//! [`Event`]s, feeds them to [`handle_event`] and carries out the returned
//! [`Action`]s with `web_request` and `hide_self`.

pub mod api;
pub mod app;
pub mod collection;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod session;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen};
pub use domain::{RentalDeskError, Result};
pub use ui::Theme;

use api::{ApiClient, DEFAULT_API_URL};
use std::collections::BTreeMap;

/// Rows per page of the customer and film tables unless configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/rentaldesk.wasm" {
///     api_url "http://localhost:5000/api"
///     page_size "12"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/rentaldesk/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the rental API. Default: `http://localhost:5000/api`
    pub api_url: String,

    /// Initial page size of paginated tables. Default: 12
    pub page_size: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox's `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset; a `page_size` that is not a positive
    /// integer falls back to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use rentaldesk::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://store.local/api".to_string());
    /// map.insert("page_size".to_string(), "24".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "http://store.local/api");
    /// assert_eq!(config.page_size, 24);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|raw| raw.trim())
                .filter(|raw| !raw.is_empty())
                .map(String::from)
        };

        let page_size = value("page_size")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_url: value("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            page_size,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// The configured theme: `theme_file`, then `theme`, then the default.
    ///
    /// A theme that fails to load is logged and skipped.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme name"),
            }
        }

        Theme::default()
    }
}

/// Creates the signed-out application state for `config`.
///
/// # Errors
///
/// Returns an error if `api_url` is not a usable base URL.
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "initializing rentaldesk plugin");

    let client = ApiClient::new(&config.api_url)?;
    Ok(AppState::new(client, config.theme(), config.page_size))
}
