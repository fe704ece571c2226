//! Shared rendering utilities.
//!
//! Widths are counted in characters, not bytes, so record text with accents
//! (customer names, addresses) lines up in the table.

/// Positions the cursor at a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{cut}{}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centers `len` characters in `cols`.
#[must_use]
pub const fn centered_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("ACADEMY DINOSAUR", 7), "ACADEM…");
        assert_eq!(truncate("ACE", 7), "ACE");
        assert_eq!(truncate("ACE", 0), "");
    }

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("José", 6), "José  ");
        assert_eq!(fit("GOLDFINGER", 4).chars().count(), 4);
    }

    #[test]
    fn centering() {
        assert_eq!(centered_padding(4, 10), 3);
        assert_eq!(centered_padding(40, 10), 0);
    }
}
