//! Generic list-view controller: fetch once, filter, paginate.
//!
//! [`CollectionController`] owns the whole life cycle of a bounded in-memory
//! collection. Records are fetched in full by a caller-supplied fetcher, then
//! filtered and paged entirely on the client. All operations other than the
//! fetch itself are synchronous and total.
//!
//! # Example
//!
//! ```rust
//! use rentaldesk::collection::{CollectionController, FetchFailure, SearchFilter, ViewState};
//!
//! let filter = SearchFilter::new().text(|s: &String| s.as_str());
//! let mut list = CollectionController::new(filter, 2, "Failed to load");
//!
//! let ticket = list.begin_load();
//! list.settle(ticket, Ok(vec!["ant".to_string(), "bee".to_string(), "cat".to_string()]));
//!
//! list.set_query("a");
//! let slice = list.visible_slice();
//! assert_eq!(slice.total_count, 2);
//! assert_eq!(slice.total_pages, 1);
//! assert!(matches!(list.state(), ViewState::Loaded(_)));
//! # let _ = FetchFailure::Unreported;
//! ```

use super::filter::SearchFilter;
use super::page::{self, VisibleSlice};
use super::state::{FetchFailure, LoadTicket, LoadTracker, Phase, ViewState};
use std::future::Future;
use std::num::NonZeroUsize;

/// Page size used when a caller asks for zero.
const FALLBACK_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// Fetch → filter → paginate state machine over records of type `T`.
///
/// # Invariants
///
/// - `matches` holds indices into `records` in ascending order.
/// - `current_page` is always within `[1, total_pages]`.
/// - Query, page-size and collection changes reset `current_page` to 1.
pub struct CollectionController<T> {
    records: Vec<T>,
    filter: SearchFilter<T>,
    query: String,
    matches: Vec<usize>,
    page_size: NonZeroUsize,
    current_page: usize,
    phase: Phase,
    tracker: LoadTracker,
    default_error: String,
}

impl<T> std::fmt::Debug for CollectionController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionController")
            .field("records", &self.records.len())
            .field("matches", &self.matches.len())
            .field("query", &self.query)
            .field("page_size", &self.page_size)
            .field("current_page", &self.current_page)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<T> CollectionController<T> {
    /// Creates an idle controller.
    ///
    /// # Parameters
    ///
    /// * `filter` - Fields the search query is matched against
    /// * `page_size` - Records per page; zero falls back to 12
    /// * `default_error` - Message shown when a fetch fails without a reason
    pub fn new(filter: SearchFilter<T>, page_size: usize, default_error: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            filter,
            query: String::new(),
            matches: Vec::new(),
            page_size: NonZeroUsize::new(page_size).unwrap_or(FALLBACK_PAGE_SIZE),
            current_page: 1,
            phase: Phase::Idle,
            tracker: LoadTracker::default(),
            default_error: default_error.into(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ViewState<'_, [T]> {
        match &self.phase {
            Phase::Idle => ViewState::Idle,
            Phase::Loading => ViewState::Loading,
            Phase::Loaded => ViewState::Loaded(&self.records),
            Phase::Failed(message) => ViewState::Error(message),
        }
    }

    /// Starts a fetch from any state and returns its ticket.
    ///
    /// A still-pending earlier fetch is superseded: its settlement will be
    /// ignored.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.tracker.issue();
        self.phase = Phase::Loading;
        tracing::debug!(generation = ticket.generation(), "collection load started");
        ticket
    }

    /// Starts a fetch only if nothing has been fetched yet.
    ///
    /// Used by triggers that may fire repeatedly (entering a screen). Returns
    /// `None` while loading, loaded or failed; use [`begin_load`] to refresh.
    ///
    /// [`begin_load`]: Self::begin_load
    pub fn ensure_loaded(&mut self) -> Option<LoadTicket> {
        matches!(self.phase, Phase::Idle).then(|| self.begin_load())
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and leaves the controller untouched if `ticket` is not
    /// the most recently issued pending ticket.
    pub fn settle(&mut self, ticket: LoadTicket, outcome: Result<Vec<T>, FetchFailure>) -> bool {
        if !self.tracker.accept(ticket) {
            tracing::debug!(generation = ticket.generation(), "ignoring stale collection response");
            return false;
        }

        match outcome {
            Ok(records) => {
                tracing::debug!(record_count = records.len(), "collection loaded");
                self.records = records;
                self.phase = Phase::Loaded;
                self.refilter();
            }
            Err(failure) => {
                let message = failure.message_or(&self.default_error);
                tracing::debug!(error = %message, "collection load failed");
                self.phase = Phase::Failed(message);
            }
        }
        true
    }

    /// Fetches the collection with `fetcher` and settles the result.
    ///
    /// The fetcher is invoked exactly once per call.
    pub async fn load<F, Fut>(&mut self, fetcher: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, FetchFailure>>,
    {
        let ticket = self.begin_load();
        let outcome = fetcher().await;
        self.settle(ticket, outcome);
    }

    /// Drops records and pending work, returning to `Idle`.
    ///
    /// The query and page size are kept.
    pub fn reset(&mut self) {
        self.tracker.abandon();
        self.records.clear();
        self.matches.clear();
        self.current_page = 1;
        self.phase = Phase::Idle;
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query, re-filters the held records and returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Changes the page size and returns to page 1. Zero is ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if let Some(size) = NonZeroUsize::new(size) {
            self.page_size = size;
            self.current_page = 1;
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        page::total_pages(self.matches.len(), self.page_size)
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to page `requested`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, requested: i64) {
        self.current_page = page::clamp_page(requested, self.total_pages());
    }

    pub fn next_page(&mut self) {
        let requested = i64::try_from(self.current_page).unwrap_or(i64::MAX).saturating_add(1);
        self.go_to_page(requested);
    }

    pub fn prev_page(&mut self) {
        let requested = i64::try_from(self.current_page).unwrap_or(1).saturating_sub(1);
        self.go_to_page(requested);
    }

    /// Snapshot of the current page.
    #[must_use]
    pub fn visible_slice(&self) -> VisibleSlice<'_, T> {
        let (start, end) = page::page_window(self.current_page, self.page_size, self.matches.len());
        VisibleSlice {
            items: self.matches[start..end]
                .iter()
                .map(|&index| &self.records[index])
                .collect(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_count: self.matches.len(),
            page_size: self.page_size.get(),
        }
    }

    fn refilter(&mut self) {
        let _span = tracing::debug_span!(
            "collection_refilter",
            total_records = self.records.len(),
            query_len = self.query.len()
        )
        .entered();

        self.matches = self.filter.apply(&self.records, &self.query);
        self.current_page = 1;

        tracing::debug!(filtered_count = self.matches.len(), "collection filter applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: String,
        email: String,
    }

    fn row(id: &str, email: &str) -> Row {
        Row {
            id: id.to_string(),
            email: email.to_string(),
        }
    }

    fn controller(page_size: usize) -> CollectionController<Row> {
        let filter = SearchFilter::new()
            .text(|r: &Row| r.id.as_str())
            .text(|r: &Row| r.email.as_str());
        CollectionController::new(filter, page_size, "Failed to load rows")
    }

    fn numbered(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|n| row(&n.to_string(), &format!("user{n}@example.com")))
            .collect()
    }

    fn loaded(page_size: usize, rows: Vec<Row>) -> CollectionController<Row> {
        let mut c = controller(page_size);
        let ticket = c.begin_load();
        assert!(c.settle(ticket, Ok(rows)));
        c
    }

    fn ids(slice: &VisibleSlice<'_, Row>) -> Vec<String> {
        slice.items.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn starts_idle_with_single_empty_page() {
        let c = controller(12);
        assert!(c.state().is_idle());
        let slice = c.visible_slice();
        assert!(slice.items.is_empty());
        assert_eq!((slice.current_page, slice.total_pages, slice.total_count), (1, 1, 0));
    }

    #[test]
    fn fourteen_records_split_twelve_and_two() {
        let mut c = loaded(12, numbered(14));

        let slice = c.visible_slice();
        assert_eq!(ids(&slice), (1..=12).map(|n| n.to_string()).collect::<Vec<_>>());
        assert_eq!((slice.current_page, slice.total_pages, slice.total_count), (1, 2, 14));

        c.go_to_page(2);
        let slice = c.visible_slice();
        assert_eq!(ids(&slice), vec!["13", "14"]);
        assert_eq!(slice.current_page, 2);
    }

    #[test]
    fn go_to_page_clamps_silently() {
        let mut c = loaded(12, numbered(30));
        c.go_to_page(-5);
        assert_eq!(c.current_page(), 1);
        c.go_to_page(1_000_000);
        assert_eq!(c.current_page(), c.total_pages());
        assert_eq!(c.current_page(), 3);
    }

    #[test]
    fn next_and_prev_stop_at_bounds() {
        let mut c = loaded(10, numbered(15));
        c.prev_page();
        assert_eq!(c.current_page(), 1);
        c.next_page();
        c.next_page();
        assert_eq!(c.current_page(), 2);
    }

    #[test]
    fn query_selects_matching_email_only() {
        let mut c = loaded(12, vec![row("1", "a@x.com"), row("2", "b@y.com")]);
        c.set_query("a@x");
        assert_eq!(ids(&c.visible_slice()), vec!["1"]);
    }

    #[test]
    fn query_change_resets_page() {
        let mut c = loaded(5, numbered(20));
        c.go_to_page(3);
        c.set_query("1");
        assert_eq!(c.current_page(), 1);
    }

    #[test]
    fn setting_same_query_twice_is_idempotent() {
        let mut c = loaded(3, numbered(14));
        c.set_query("1");
        let once = ids(&c.visible_slice());
        c.set_query("1");
        assert_eq!(ids(&c.visible_slice()), once);
    }

    #[test]
    fn page_size_change_resets_page_and_ignores_zero() {
        let mut c = loaded(5, numbered(20));
        c.go_to_page(4);
        c.set_page_size(6);
        assert_eq!((c.current_page(), c.total_pages()), (1, 4));

        c.go_to_page(2);
        c.set_page_size(0);
        assert_eq!((c.page_size(), c.current_page()), (6, 2));
    }

    #[test]
    fn zero_initial_page_size_falls_back() {
        assert_eq!(controller(0).page_size(), 12);
    }

    #[test]
    fn filtered_view_is_ordered_subset() {
        let rows = numbered(40);
        for query in ["", "1", "2", "example", "zzz", "USER3"] {
            let mut c = loaded(100, rows.clone());
            c.set_query(query);
            let slice = c.visible_slice();
            let mut last = None;
            for item in &slice.items {
                let position = rows.iter().position(|r| r == *item).expect("subset");
                assert!(last.map_or(true, |l| position > l), "order preserved for {query:?}");
                last = Some(position);
            }
            assert_eq!(slice.total_pages, std::cmp::max(1, (slice.total_count + 99) / 100));
        }
    }

    #[test]
    fn empty_result_is_one_empty_page() {
        let mut c = loaded(12, numbered(5));
        c.set_query("nothing-matches");
        let slice = c.visible_slice();
        assert!(slice.items.is_empty());
        assert_eq!((slice.current_page, slice.total_pages, slice.total_count), (1, 1, 0));
    }

    #[test]
    fn rejected_fetch_reports_reason_and_stays_usable() {
        let mut c = controller(12);
        let ticket = c.begin_load();
        c.settle(ticket, Err(FetchFailure::Reported("network down".to_string())));

        assert_eq!(c.state(), ViewState::Error("network down"));
        c.set_query("anything");
        assert!(c.visible_slice().items.is_empty());
    }

    #[test]
    fn failure_without_reason_uses_default() {
        let mut c = controller(12);
        let ticket = c.begin_load();
        c.settle(ticket, Err(FetchFailure::Unreported));
        assert_eq!(c.state(), ViewState::Error("Failed to load rows"));
    }

    #[test]
    fn failure_keeps_previous_records_in_memory() {
        let mut c = loaded(12, numbered(3));
        let ticket = c.begin_load();
        c.settle(ticket, Err(FetchFailure::Unreported));
        assert_eq!(c.visible_slice().total_count, 3);
    }

    #[test]
    fn last_call_wins() {
        let mut c = controller(12);
        let first = c.begin_load();
        let second = c.begin_load();

        assert!(c.settle(second, Ok(vec![row("2", "second@x.com")])));
        assert!(!c.settle(first, Ok(vec![row("1", "first@x.com")])));

        match c.state() {
            ViewState::Loaded(records) => assert_eq!(records, &[row("2", "second@x.com")][..]),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn stale_failure_does_not_clobber_loading() {
        let mut c = controller(12);
        let first = c.begin_load();
        let _second = c.begin_load();
        assert!(!c.settle(first, Err(FetchFailure::Unreported)));
        assert!(c.state().is_loading());
    }

    #[test]
    fn ensure_loaded_only_fires_from_idle() {
        let mut c = controller(12);
        let ticket = c.ensure_loaded().expect("first trigger loads");
        assert!(c.ensure_loaded().is_none(), "no duplicate fetch while loading");
        c.settle(ticket, Ok(numbered(2)));
        assert!(c.ensure_loaded().is_none());
    }

    #[test]
    fn completion_applies_latest_query() {
        let mut c = controller(12);
        let ticket = c.begin_load();
        c.set_query("user2@");
        c.settle(ticket, Ok(numbered(3)));
        assert_eq!(ids(&c.visible_slice()), vec!["2"]);
    }

    #[test]
    fn reset_returns_to_idle_and_drops_pending() {
        let mut c = controller(12);
        let ticket = c.begin_load();
        c.reset();
        assert!(!c.settle(ticket, Ok(numbered(2))));
        assert!(c.state().is_idle());
        assert!(c.ensure_loaded().is_some());
    }

    #[test]
    fn async_load_invokes_fetcher_once() {
        let mut c = controller(12);
        let mut calls = 0;
        c.load(|| {
            calls += 1;
            std::future::ready(Ok(numbered(14)))
        })
        .now_or_never()
        .expect("ready future completes");

        assert_eq!(calls, 1);
        assert_eq!(c.visible_slice().total_pages, 2);
    }

    #[test]
    fn async_load_captures_rejection() {
        let mut c = controller(12);
        c.load(|| std::future::ready(Err(FetchFailure::Reported("network down".to_string()))))
            .now_or_never()
            .expect("ready future completes");
        assert_eq!(c.state(), ViewState::Error("network down"));
    }
}
