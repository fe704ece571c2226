//! Page indicator renderer.

use crate::ui::helpers::{centered_padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ Page X of Y ›  N results, S per page`, centered.
///
/// The arrows are dimmed when there is no page in that direction.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let arrow = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.accent)
        } else {
            Theme::fg(&theme.colors.border)
        }
    };

    let label = truncate(&pagination.page_label, cols);
    let summary = format!("  {}", pagination.summary);
    let label_width = label.chars().count() + 4;
    let padding = centered_padding(label_width + summary.chars().count(), cols);
    let summary = truncate(&summary, cols.saturating_sub(padding + label_width));

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}‹ ", arrow(pagination.has_previous));
    print!("{}{}{label}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset());
    print!("{} ›", arrow(pagination.has_next));
    print!("{}{summary}", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}
