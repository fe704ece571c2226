//! Detail views keyed by record id.

use crate::collection::{FetchFailure, LoadTicket, Resource, ViewState};
use crate::domain::Record;

/// A [`Resource`] that remembers which record id it was loaded for.
///
/// Showing the same id again reuses the loaded value; showing another id
/// drops it and supersedes any in-flight fetch. A response carrying a
/// different record than the one requested counts as a failed fetch.
#[derive(Debug)]
pub struct DetailView<T> {
    id: Option<i64>,
    resource: Resource<T>,
}

impl<T: Record<Id = i64>> DetailView<T> {
    pub fn new(default_error: impl Into<String>) -> Self {
        Self {
            id: None,
            resource: Resource::new(default_error),
        }
    }

    /// Switches the view to `id`, returning a ticket when a fetch is needed.
    pub fn show(&mut self, id: i64) -> Option<LoadTicket> {
        if self.id == Some(id) {
            return self.resource.ensure_loaded();
        }
        self.id = Some(id);
        self.resource.reset();
        Some(self.resource.begin_load())
    }

    /// Re-fetches the current id, if any.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        self.id.map(|_| self.resource.begin_load())
    }

    pub fn settle(&mut self, ticket: LoadTicket, outcome: Result<T, FetchFailure>) -> bool {
        let outcome = match outcome {
            Ok(record) if self.id != Some(record.id()) => {
                tracing::warn!(requested = ?self.id, received = record.id(), "details response for another record");
                Err(FetchFailure::Unreported)
            }
            other => other,
        };
        self.resource.settle(ticket, outcome)
    }

    pub fn reset(&mut self) {
        self.id = None;
        self.resource.reset();
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> ViewState<'_, T> {
        self.resource.state()
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.resource.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Title(i64, &'static str);

    impl Record for Title {
        type Id = i64;

        fn id(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn same_id_reuses_loaded_value() {
        let mut view = DetailView::new("Failed to load film details");
        let ticket = view.show(1).unwrap();
        assert!(view.settle(ticket, Ok(Title(1, "ACADEMY DINOSAUR"))));

        assert!(view.show(1).is_none());
        assert_eq!(view.state(), ViewState::Loaded(&Title(1, "ACADEMY DINOSAUR")));
    }

    #[test]
    fn new_id_supersedes_in_flight_fetch() {
        let mut view = DetailView::new("Failed to load film details");
        let first = view.show(1).unwrap();
        let second = view.show(2).unwrap();

        assert!(!view.settle(first, Ok(Title(1, "ACADEMY DINOSAUR"))));
        assert!(view.state().is_loading());
        assert!(view.settle(second, Ok(Title(2, "ACE GOLDFINGER"))));
        assert_eq!(view.value(), Some(&Title(2, "ACE GOLDFINGER")));
        assert_eq!(view.id(), Some(2));
    }

    #[test]
    fn record_for_another_id_is_a_failure() {
        let mut view = DetailView::new("Failed to load film details");
        let ticket = view.show(7).unwrap();

        assert!(view.settle(ticket, Ok(Title(8, "AFRICAN EGG"))));
        assert_eq!(view.state(), ViewState::Error("Failed to load film details"));
        assert!(view.value().is_none());
    }

    #[test]
    fn refresh_needs_an_id() {
        let mut view: DetailView<Title> = DetailView::new("x");
        assert!(view.refresh().is_none());
        view.show(3);
        assert!(view.refresh().is_some());
        view.reset();
        assert!(view.id().is_none());
        assert!(view.state().is_idle());
    }
}
