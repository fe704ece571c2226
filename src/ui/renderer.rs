//! Top-level rendering coordinator.
//!
//! The frame is stacked top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]     (Films, Customers)
//! [Notice]                   (validation errors, banners)
//! [Content]
//! [Pagination]               (paginated tables)
//! [Border]
//! [Footer]
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Content, UIViewModel};

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = components::render_header(current_row, &vm.header, theme, cols);
    current_row = components::render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = components::render_search_bar(current_row, search, theme, cols);
    }
    if let Some(notice) = &vm.notice {
        current_row = components::render_notice(current_row, notice, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let mut content_end = border_row;
    if let Some(pagination) = &vm.pagination {
        content_end = border_row.saturating_sub(1);
        components::render_pagination(content_end, pagination, theme, cols);
    }

    match &vm.content {
        Content::Message(empty) => {
            components::render_empty_state(current_row + 2, empty, theme, cols);
        }
        Content::Table(table) => {
            components::render_table(current_row, table, theme, cols, content_end);
        }
        Content::Sections(sections) => {
            components::render_sections(current_row, sections, theme, cols, content_end);
        }
        Content::Login(form) => {
            components::render_login_form(current_row + 1, form, theme, cols);
        }
    }

    components::render_border(border_row, &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);
}
