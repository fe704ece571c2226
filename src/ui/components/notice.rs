//! Inline notice renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::Notice;

/// Renders a one-line notice indented under the search bar.
pub fn render_notice(row: usize, notice: &Notice, theme: &Theme, cols: usize) -> usize {
    let color = if notice.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.success_fg
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", fit(&format!("  {}", notice.text), cols));
    print!("{}", Theme::reset());
    row + 1
}
