//! Case-insensitive substring filtering over caller-defined record fields.
//!
//! A record matches a query when at least one of its searchable fields
//! contains the query as a substring, ignoring case. There is no tokenizing
//! or fuzzy scoring: the set of records reachable by a search string is
//! exactly the set whose fields contain it.

use std::borrow::Cow;

/// Produces one searchable string from a record.
pub trait Extract<T> {
    fn extract<'a>(&self, record: &'a T) -> Cow<'a, str>;
}

/// Extractor over a borrowed text field.
struct TextField<F>(F);

impl<T, F> Extract<T> for TextField<F>
where
    F: Fn(&T) -> &str,
{
    fn extract<'a>(&self, record: &'a T) -> Cow<'a, str> {
        Cow::Borrowed((self.0)(record))
    }
}

/// Extractor over a numeric field, searched through its decimal form.
struct NumberField<F>(F);

impl<T, F> Extract<T> for NumberField<F>
where
    F: Fn(&T) -> i64,
{
    fn extract<'a>(&self, record: &'a T) -> Cow<'a, str> {
        Cow::Owned((self.0)(record).to_string())
    }
}

/// Set of extractors a query is matched against.
///
/// # Example
///
/// ```rust
/// use rentaldesk::collection::SearchFilter;
///
/// struct Row { id: i64, email: String }
///
/// let filter = SearchFilter::new()
///     .number(|r: &Row| r.id)
///     .text(|r: &Row| r.email.as_str());
///
/// let rows = vec![Row { id: 7, email: "a@x.com".into() }];
/// assert_eq!(filter.apply(&rows, "A@X"), vec![0]);
/// ```
pub struct SearchFilter<T> {
    fields: Vec<Box<dyn Extract<T>>>,
}

impl<T> Default for SearchFilter<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> std::fmt::Debug for SearchFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFilter")
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl<T: 'static> SearchFilter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    #[must_use]
    pub fn text<F>(mut self, field: F) -> Self
    where
        F: Fn(&T) -> &str + 'static,
    {
        self.fields.push(Box::new(TextField(field)));
        self
    }

    /// Adds a numeric field, matched through its decimal representation.
    #[must_use]
    pub fn number<F>(mut self, field: F) -> Self
    where
        F: Fn(&T) -> i64 + 'static,
    {
        self.fields.push(Box::new(NumberField(field)));
        self
    }

    /// Adds a custom extractor.
    #[must_use]
    pub fn with(mut self, extractor: impl Extract<T> + 'static) -> Self {
        self.fields.push(Box::new(extractor));
        self
    }
}

impl<T> SearchFilter<T> {
    /// Returns whether any field of `record` contains `needle`.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, record: &T, needle: &str) -> bool {
        self.fields
            .iter()
            .any(|field| field.extract(record).to_lowercase().contains(needle))
    }

    /// Returns the indices of `records` matching `query`, in source order.
    ///
    /// A query that is empty or whitespace-only matches every record. The
    /// query itself is not trimmed for matching.
    #[must_use]
    pub fn apply(&self, records: &[T], query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return (0..records.len()).collect();
        }

        let needle = query.to_lowercase();
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record, &needle))
            .map(|(index, _)| index)
            .collect()
    }
}
