//! Composable UI component renderers.
//!
//! Each component prints one part of the frame at a given row and returns the
//! next free row, so the renderer can stack them top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with the screen name and signed-in staff
//! - [`footer`]: Keybinding hints
//! - [`search`]: Bordered search or filter input
//! - [`notice`]: One-line inline message
//! - [`table`]: Record table with fixed and flexible columns
//! - [`sections`]: Titled field lists for the dashboard and details screens
//! - [`login`]: Sign-in form
//! - [`pagination`]: Page indicator below a table
//! - [`empty`]: Centered loading, error and empty messages

mod empty;
mod footer;
mod header;
mod login;
mod notice;
mod pagination;
mod search;
mod sections;
mod table;

pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use login::render_login_form;
pub use notice::render_notice;
pub use pagination::render_pagination;
pub use search::render_search_bar;
pub use sections::render_sections;
pub use table::render_table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders a horizontal separator line and returns the next row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}
