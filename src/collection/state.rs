//! Load lifecycle types shared by collection and single-value views.
//!
//! A view moves through `Idle → Loading → Loaded | Error`. Every fetch is
//! stamped with a [`LoadTicket`]; only the most recently issued ticket may
//! settle the view, so a slow response can never overwrite a newer one.

use thiserror::Error;

/// Generation stamp identifying one fetch issued by a view.
///
/// Tickets are handed out by `begin_load` and must be passed back to
/// `settle` together with the fetch outcome. The generation travels through
/// the HTTP request context so responses can be matched to their fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Rebuilds a ticket from a generation carried across a transport.
    #[must_use]
    pub const fn from_generation(generation: u64) -> Self {
        Self { generation }
    }

    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Reason a fetch did not produce records.
///
/// This is the only failure a view knows about. It is captured into the
/// view's error state and never returned to the caller of `settle`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The collaborator reported a reason (e.g. the API's `error` field).
    #[error("{0}")]
    Reported(String),

    /// The collaborator failed without saying why.
    #[error("fetch failed without a reported reason")]
    Unreported,
}

impl FetchFailure {
    /// Creates a failure from an optional reason; blank reasons count as none.
    pub fn from_reason(reason: Option<String>) -> Self {
        match reason {
            Some(reason) if !reason.trim().is_empty() => Self::Reported(reason),
            _ => Self::Unreported,
        }
    }

    /// Message to surface to the user, falling back to `default`.
    #[must_use]
    pub fn message_or(&self, default: &str) -> String {
        match self {
            Self::Reported(reason) => reason.clone(),
            Self::Unreported => default.to_string(),
        }
    }
}

/// Borrowed snapshot of a view's lifecycle.
///
/// Exactly one variant holds at any time. `V` is `[T]` for collections and
/// `T` for single-value resources.
#[derive(Debug, PartialEq, Eq)]
pub enum ViewState<'a, V: ?Sized> {
    Idle,
    Loading,
    Loaded(&'a V),
    Error(&'a str),
}

impl<V: ?Sized> Clone for ViewState<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for ViewState<'_, V> {}

impl<V: ?Sized> ViewState<'_, V> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Owned lifecycle phase; payloads live beside it in the owning view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Issues tickets and decides which settlement is current.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadTracker {
    last_issued: u64,
    pending: Option<u64>,
}

impl LoadTracker {
    /// Issues a new ticket, superseding any pending one.
    pub(crate) fn issue(&mut self) -> LoadTicket {
        self.last_issued = self.last_issued.wrapping_add(1);
        self.pending = Some(self.last_issued);
        LoadTicket::from_generation(self.last_issued)
    }

    /// Accepts `ticket` if it is the pending one, consuming it.
    pub(crate) fn accept(&mut self, ticket: LoadTicket) -> bool {
        if self.pending == Some(ticket.generation()) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forgets the pending ticket; its response will be ignored.
    pub(crate) fn abandon(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reason_falls_back_to_default() {
        let failure = FetchFailure::from_reason(Some("   ".to_string()));
        assert_eq!(failure, FetchFailure::Unreported);
        assert_eq!(failure.message_or("Search failed"), "Search failed");
    }

    #[test]
    fn reported_reason_wins_over_default() {
        let failure = FetchFailure::from_reason(Some("network down".to_string()));
        assert_eq!(failure.message_or("Search failed"), "network down");
    }

    #[test]
    fn only_latest_ticket_is_accepted() {
        let mut tracker = LoadTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.accept(first));
        assert!(tracker.accept(second));
        assert!(!tracker.accept(second), "a ticket settles at most once");
    }

    #[test]
    fn abandoned_ticket_is_rejected() {
        let mut tracker = LoadTracker::default();
        let ticket = tracker.issue();
        tracker.abandon();
        assert!(!tracker.accept(ticket));
    }
}
