//! Single fetched value with the same lifecycle as a collection.
//!
//! Used for detail views and dashboard rankings: one request, one value,
//! `Idle → Loading → Loaded | Error`, with last-call-wins settlement.

use super::state::{FetchFailure, LoadTicket, LoadTracker, Phase, ViewState};

#[derive(Debug)]
pub struct Resource<T> {
    value: Option<T>,
    phase: Phase,
    tracker: LoadTracker,
    default_error: String,
}

impl<T> Resource<T> {
    pub fn new(default_error: impl Into<String>) -> Self {
        Self {
            value: None,
            phase: Phase::Idle,
            tracker: LoadTracker::default(),
            default_error: default_error.into(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewState<'_, T> {
        match (&self.phase, &self.value) {
            (Phase::Loading, _) => ViewState::Loading,
            (Phase::Loaded, Some(value)) => ViewState::Loaded(value),
            (Phase::Failed(message), _) => ViewState::Error(message),
            (Phase::Idle | Phase::Loaded, _) => ViewState::Idle,
        }
    }

    /// Last successfully loaded value, kept across failures and reloads.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.phase = Phase::Loading;
        self.tracker.issue()
    }

    pub fn ensure_loaded(&mut self) -> Option<LoadTicket> {
        matches!(self.phase, Phase::Idle).then(|| self.begin_load())
    }

    /// Applies the outcome for `ticket`; stale tickets are ignored.
    pub fn settle(&mut self, ticket: LoadTicket, outcome: Result<T, FetchFailure>) -> bool {
        if !self.tracker.accept(ticket) {
            tracing::debug!(generation = ticket.generation(), "ignoring stale resource response");
            return false;
        }

        match outcome {
            Ok(value) => {
                self.value = Some(value);
                self.phase = Phase::Loaded;
            }
            Err(failure) => {
                self.phase = Phase::Failed(failure.message_or(&self.default_error));
            }
        }
        true
    }

    /// Drops the value and any pending fetch.
    pub fn reset(&mut self) {
        self.tracker.abandon();
        self.value = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_reports_value() {
        let mut r: Resource<u32> = Resource::new("Failed to load film details");
        let ticket = r.ensure_loaded().unwrap();
        assert!(r.state().is_loading());
        r.settle(ticket, Ok(7));
        assert_eq!(r.state(), ViewState::Loaded(&7));
    }

    #[test]
    fn failure_uses_default_message_and_keeps_value() {
        let mut r: Resource<u32> = Resource::new("Failed to load film details");
        let t = r.begin_load();
        r.settle(t, Ok(1));
        let t = r.begin_load();
        r.settle(t, Err(FetchFailure::Unreported));
        assert_eq!(r.state(), ViewState::Error("Failed to load film details"));
        assert_eq!(r.value(), Some(&1));
    }

    #[test]
    fn superseded_fetch_is_ignored() {
        let mut r: Resource<&str> = Resource::new("x");
        let old = r.begin_load();
        let new = r.begin_load();
        r.settle(new, Ok("new"));
        assert!(!r.settle(old, Ok("old")));
        assert_eq!(r.value(), Some(&"new"));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut r: Resource<u32> = Resource::new("x");
        let t = r.begin_load();
        r.reset();
        assert!(!r.settle(t, Ok(3)));
        assert!(r.state().is_idle());
        assert!(r.value().is_none());
    }
}
