//! Trace context propagation through web request context maps.
//!
//! The id pair of the span that issued a request is written into the request's
//! context map. When the host echoes the map back with the response, the pair is
//! re-attached as a remote parent so response handling lands in the same trace.

use opentelemetry::trace::{
    SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
};
use std::collections::BTreeMap;
use tracing_opentelemetry::OpenTelemetrySpanExt;

const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Serializable OpenTelemetry trace position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 hex characters.
    pub trace_id: String,
    /// Issuing span id as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current `tracing` span.
    ///
    /// Returns `None` when tracing is not initialized or the span is not
    /// sampled, which is the normal case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
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

    /// Adds the ids to a request context map.
    pub fn insert_into(&self, map: &mut BTreeMap<String, String>) {
        map.insert(TRACE_ID_KEY.to_string(), self.trace_id.clone());
        map.insert(PARENT_SPAN_ID_KEY.to_string(), self.parent_span_id.clone());
    }

    /// Reads the ids back from an echoed context map.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: map.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: map.get(PARENT_SPAN_ID_KEY)?.clone(),
        })
    }

    /// Makes the stored span the remote parent of spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let remote = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(remote)
                .attach(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_without_subscriber() {
        assert_eq!(TraceContext::from_current(), None);
    }

    #[test]
    fn map_round_trip() {
        let ctx = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let mut map = BTreeMap::new();
        ctx.insert_into(&mut map);
        assert_eq!(TraceContext::from_map(&map), Some(ctx.clone()));
        assert!(ctx.attach().is_some());
    }

    #[test]
    fn invalid_hex_does_not_attach() {
        let ctx = TraceContext {
            trace_id: "nothex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(ctx.attach().is_none());
    }
}
