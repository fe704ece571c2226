//! Table component renderer.
//!
//! Renders a [`TableInfo`]: a bold heading line followed by one line per row.
//! Columns with a fixed width keep it; the column without one takes whatever
//! the pane has left.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnInfo, RowInfo, TableInfo};

/// Space between adjacent columns.
const COLUMN_GAP: usize = 2;

/// Narrowest a flexible column is allowed to get.
const MIN_FLEX_WIDTH: usize = 8;

/// Renders the table starting at `row`, stopping before `last_row`.
///
/// Returns the next free row.
pub fn render_table(row: usize, table: &TableInfo, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let widths = column_widths(&table.columns, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let titles: Vec<&str> = table.columns.iter().map(|c| c.title.as_str()).collect();
    print!("{}", fit(&join_cells(&titles, &widths), cols));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for table_row in &table.rows {
        if current_row >= last_row {
            break;
        }
        current_row = render_table_row(current_row, table_row, &widths, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, table_row: &RowInfo, widths: &[usize], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if table_row.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let cells: Vec<&str> = table_row.cells.iter().map(String::as_str).collect();
    // Padded to the full width so the selection background spans the line.
    print!("{}", fit(&join_cells(&cells, widths), cols));

    print!("{}", Theme::reset());
    row + 1
}

fn join_cells(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| fit(cell, width))
        .collect::<Vec<_>>()
        .join(&" ".repeat(COLUMN_GAP))
}

/// Resolves every column's width for a pane `cols` wide.
fn column_widths(columns: &[ColumnInfo], cols: usize) -> Vec<usize> {
    let fixed: usize = columns.iter().filter_map(|c| c.width).sum();
    let gaps = COLUMN_GAP * columns.len().saturating_sub(1);
    let flexible = columns.iter().filter(|c| c.width.is_none()).count();

    let remaining = cols.saturating_sub(fixed + gaps);
    let flex_width = if flexible == 0 {
        0
    } else {
        (remaining / flexible).max(MIN_FLEX_WIDTH)
    };

    columns.iter().map(|c| c.width.unwrap_or(flex_width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(width: Option<usize>) -> ColumnInfo {
        ColumnInfo {
            title: String::new(),
            width,
        }
    }

    #[test]
    fn flexible_column_takes_the_rest() {
        let columns = [column(Some(6)), column(Some(24)), column(None)];
        assert_eq!(column_widths(&columns, 80), vec![6, 24, 46]);
    }

    #[test]
    fn flexible_column_keeps_a_minimum() {
        let columns = [column(Some(30)), column(None)];
        assert_eq!(column_widths(&columns, 20), vec![30, MIN_FLEX_WIDTH]);
    }

    #[test]
    fn cells_are_fitted_and_joined() {
        assert_eq!(join_cells(&["1", "MARY SMITH"], &[3, 6]), "1    MARY …");
    }
}
