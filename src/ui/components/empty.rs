//! Centered status message renderer.
//!
//! Used for every non-table state of a view: loading, error and empty
//! results.

use crate::ui::helpers::{centered_padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message at `row` and its subtitle below it.
///
/// Errors use `error_fg`; everything else uses `empty_state_fg`. The
/// subtitle is dimmed and skipped when blank.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };
    print_centered(row, &empty.message, color, cols);

    if empty.subtitle.is_empty() {
        return row + 1;
    }
    print!("{}", Theme::dim());
    print_centered(row + 1, &empty.subtitle, &theme.colors.text_dim, cols);
    row + 2
}

fn print_centered(row: usize, text: &str, color: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text.chars().count();
    let padding = centered_padding(len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
