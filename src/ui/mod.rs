//! User interface rendering layer.
//!
//! Turns application state into ANSI-styled output in two steps:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Frame layout and component dispatch
//! - [`components`]: Header, table, sections, login form and the rest
//! - [`helpers`]: Cursor positioning and width fitting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Content, UIViewModel};
