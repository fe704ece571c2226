//! Sign-in form renderer.

use crate::ui::helpers::{centered_padding, fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoginFormInfo;

/// Width of the value area of each field.
const FIELD_WIDTH: usize = 28;

/// Renders the two login fields centered below `row`.
///
/// ```text
///         Rental Desk Staff Login
///
///     ▸ Username  [Mike                        ]
///       Password  [*****                       ]
///
///                Signing in...
/// ```
pub fn render_login_form(row: usize, form: &LoginFormInfo, theme: &Theme, cols: usize) -> usize {
    let title = "Rental Desk Staff Login";
    position_cursor(row + 1, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    print!("{}", " ".repeat(centered_padding(title.len(), cols)));
    print!("{title}");
    print!("{}", Theme::reset());

    let line_width = 2 + 10 + FIELD_WIDTH + 2;
    let indent = centered_padding(line_width, cols);
    render_field(row + 3, indent, "Username", &form.username, form.username_focused, theme);
    render_field(row + 4, indent, "Password", &form.password_mask, !form.username_focused, theme);

    if form.is_submitting {
        let status = "Signing in...";
        position_cursor(row + 6, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", " ".repeat(centered_padding(status.len(), cols)));
        print!("{status}");
        print!("{}", Theme::reset());
    }
    row + 7
}

fn render_field(row: usize, indent: usize, label: &str, value: &str, focused: bool, theme: &Theme) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(indent));

    let (marker, frame) = if focused {
        ("▸ ", &theme.colors.input_border)
    } else {
        ("  ", &theme.colors.border)
    };
    print!("{}{marker}", Theme::fg(&theme.colors.accent));
    print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(label, 10));

    // Long input keeps its tail visible.
    let visible: String = if value.chars().count() > FIELD_WIDTH {
        let skip = value.chars().count() - FIELD_WIDTH;
        value.chars().skip(skip).collect()
    } else {
        truncate(value, FIELD_WIDTH)
    };
    print!("{}[", Theme::fg(frame));
    print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(&visible, FIELD_WIDTH));
    print!("{}]", Theme::fg(frame));
    print!("{}", Theme::reset());
}
