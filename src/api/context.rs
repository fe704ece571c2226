//! Correlation data carried alongside every web request.
//!
//! The host echoes the context map back verbatim with the response, which is
//! how a `WebRequestResult` is routed to the view that issued it and how the
//! response handling joins the request's trace.

use super::request::Target;
use crate::collection::LoadTicket;
use crate::domain::{RentalDeskError, Result};
use std::collections::BTreeMap;

const KEY_TARGET: &str = "target";
const KEY_GENERATION: &str = "generation";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// OpenTelemetry ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 hex digits.
    pub trace_id: String,

    /// Span id of the issuing span as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the issuing span as a remote parent context.
    ///
    /// Returns `None` when either id is not valid hex.
    #[must_use]
    pub fn remote_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(remote))
    }

    /// Parents `span` under the span that issued the request.
    pub fn adopt(&self, span: &tracing::Span) {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        if let Some(parent) = self.remote_context() {
            span.set_parent(parent);
        }
    }
}

/// Which view issued a request and under which load generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub target: Target,
    pub generation: u64,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Context for a request settling `ticket`, stamped with the current trace.
    #[must_use]
    pub fn new(target: Target, ticket: LoadTicket) -> Self {
        Self {
            target,
            generation: ticket.generation(),
            trace: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> LoadTicket {
        LoadTicket::from_generation(self.generation)
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_TARGET.to_string(), self.target.to_string());
        map.insert(KEY_GENERATION.to_string(), self.generation.to_string());
        if let Some(trace) = &self.trace {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Parses a context map echoed back by the host.
    ///
    /// # Errors
    ///
    /// Returns [`RentalDeskError::Api`] when the target or generation is
    /// missing or malformed.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let target = map
            .get(KEY_TARGET)
            .ok_or_else(|| RentalDeskError::Api("response context has no target".to_string()))?
            .parse::<Target>()
            .map_err(RentalDeskError::Api)?;

        let generation = map
            .get(KEY_GENERATION)
            .and_then(|raw| raw.parse::<u64>().ok())
            .ok_or_else(|| RentalDeskError::Api("response context has no valid generation".to_string()))?;

        let trace = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            target,
            generation,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_the_host_round_trip() {
        let context = RequestContext {
            target: Target::FilmSearch,
            generation: 7,
            trace: Some(TraceContext {
                trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
                parent_span_id: "00f067aa0ba902b7".into(),
            }),
        };

        let parsed = RequestContext::from_map(&context.to_map()).unwrap();
        assert_eq!(parsed, context);
        assert_eq!(parsed.ticket(), LoadTicket::from_generation(7));
    }

    #[test]
    fn trace_ids_are_optional() {
        let context = RequestContext {
            target: Target::Customers,
            generation: 1,
            trace: None,
        };
        let map = context.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(RequestContext::from_map(&map).unwrap().trace, None);
    }

    #[test]
    fn malformed_maps_are_rejected() {
        let mut map = BTreeMap::new();
        assert!(RequestContext::from_map(&map).is_err());

        map.insert("target".to_string(), "customers".to_string());
        map.insert("generation".to_string(), "soon".to_string());
        assert!(RequestContext::from_map(&map).is_err());

        map.insert("target".to_string(), "rentals".to_string());
        map.insert("generation".to_string(), "3".to_string());
        assert!(matches!(RequestContext::from_map(&map), Err(RentalDeskError::Api(_))));
    }

    #[test]
    fn no_trace_without_an_otel_layer() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn remote_context_needs_valid_hex() {
        use opentelemetry::trace::TraceContextExt;

        let mut trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            parent_span_id: "00f067aa0ba902b7".into(),
        };
        let context = trace.remote_context().unwrap();
        assert!(context.span().span_context().is_remote());

        trace.trace_id = "zz".into();
        assert!(trace.remote_context().is_none());
    }
}
