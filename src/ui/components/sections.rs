//! Section list renderer for the dashboard and details screens.

use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, SectionInfo};

const INDENT: &str = "  ";

/// Renders the sections one after another, stopping before `last_row`.
///
/// Each section is its title, its label/value fields with labels aligned,
/// then its list items. A section with neither fields nor items shows its
/// placeholder instead.
pub fn render_sections(row: usize, sections: &[SectionInfo], theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row + 1;

    for section in sections {
        if current_row >= last_row {
            break;
        }
        position_cursor(current_row, 1);
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
        print!("{}", fit(&format!("{INDENT}{}", section.title), cols));
        print!("{}", Theme::reset());
        current_row += 1;

        let label_width = section.fields.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0) + 1;
        for (label, value) in &section.fields {
            if current_row >= last_row {
                return current_row;
            }
            let value_width = cols.saturating_sub(INDENT.len() * 2 + label_width + 1);
            position_cursor(current_row, 1);
            print!("{INDENT}{INDENT}{}", Theme::fg(&theme.colors.text_dim));
            print!("{}", fit(&format!("{label}:"), label_width));
            print!(" {}", Theme::fg(&theme.colors.text_normal));
            print!("{}", fit(value, value_width));
            print!("{}", Theme::reset());
            current_row += 1;
        }

        for item in &section.items {
            if current_row >= last_row {
                return current_row;
            }
            current_row = render_item(current_row, item, theme, cols);
        }

        if section.fields.is_empty() && section.items.is_empty() {
            if let Some(placeholder) = &section.placeholder {
                position_cursor(current_row, 1);
                print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
                print!("{}", fit(&format!("{INDENT}{INDENT}{placeholder}"), cols));
                print!("{}", Theme::reset());
                current_row += 1;
            }
        }

        current_row += 1;
    }
    current_row
}

fn render_item(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{INDENT}");

    let line_width = cols.saturating_sub(INDENT.len());
    let label = truncate(&item.label, line_width.saturating_sub(2));
    let detail_width = line_width.saturating_sub(label.chars().count() + 4);
    let detail = truncate(&item.detail, detail_width);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("{}", fit(&format!("▸ {label}  {detail}"), line_width));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {label}  ");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", fit(&detail, detail_width));
    }

    print!("{}", Theme::reset());
    row + 1
}
