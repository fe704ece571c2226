//! Pagination arithmetic and the visible page snapshot.

use std::num::NonZeroUsize;

/// Number of pages needed for `count` items; never less than one.
#[must_use]
pub const fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    let size = page_size.get();
    let pages = count / size + if count % size == 0 { 0 } else { 1 };
    if pages == 0 {
        1
    } else {
        pages
    }
}

/// Clamps a requested page number into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages).unwrap_or(i64::MAX).max(1);
    let clamped = requested.clamp(1, last);
    usize::try_from(clamped).unwrap_or(1)
}

/// Half-open index window `[start, end)` of `page` within `count` items.
#[must_use]
pub fn page_window(page: usize, page_size: NonZeroUsize, count: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size.get()).min(count);
    let end = start.saturating_add(page_size.get()).min(count);
    (start, end)
}

/// The current page of a filtered collection plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSlice<'a, T> {
    /// Records on the current page, in filtered order.
    pub items: Vec<&'a T>,
    /// One-based page number.
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of records passing the current query.
    pub total_count: usize,
    pub page_size: usize,
}

impl<T> VisibleSlice<'_, T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn total_pages_is_ceiling_with_floor_of_one() {
        for count in 0..60 {
            for s in 1..15 {
                let expected = std::cmp::max(1, (count + s - 1) / s);
                assert_eq!(total_pages(count, size(s)), expected, "count={count} size={s}");
            }
        }
    }

    #[test]
    fn clamp_handles_extremes() {
        assert_eq!(clamp_page(-5, 3), 1);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(1_000_000, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn window_never_exceeds_count() {
        assert_eq!(page_window(1, size(12), 14), (0, 12));
        assert_eq!(page_window(2, size(12), 14), (12, 14));
        assert_eq!(page_window(1, size(12), 0), (0, 0));
        assert_eq!(page_window(9, size(12), 14), (14, 14));
    }
}
