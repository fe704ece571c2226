//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (`main.rs`) and the
//! collection/api/domain layers. Data flows one way:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Host Calls
//!                           ↑                                           ↓
//!                           └────────────── WebRequestResult ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`details`]: Record views keyed by id
//! - [`handler`]: Event processing and response routing
//! - [`modes`]: Screen and input mode types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use rentaldesk::api::{ApiClient, DEFAULT_API_URL};
//! use rentaldesk::app::{handle_event, AppState, Event};
//! use rentaldesk::ui::theme::Theme;
//!
//! let client = ApiClient::new(DEFAULT_API_URL)?;
//! let mut state = AppState::new(client, Theme::default(), 12);
//! let (render, actions) = handle_event(&mut state, &Event::Enter)?;
//! assert!(render);
//! assert!(actions.is_empty()); // empty credentials are rejected locally
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod details;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DashboardPane, InputMode, LoginField, Screen};
pub use state::AppState;
