//! Fetch request and response messages.
//!
//! This module defines the protocol between an event-loop host and whatever executes
//! remote requests on its behalf. Requests carry the tracing context of the span that
//! issued them so the executing span is linked to it, even when the request crosses a
//! task or thread boundary.

use super::coordinator::LoadTicket;
use crate::domain::{FailureKind, LocationRecord, NewLocationRecord};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain trace
/// continuity when a request is executed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context, which
    /// is the case when tracing is not initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            tracing::trace!("span context is not valid");
            None
        }
    }

    /// W3C `traceparent` header value for this context.
    ///
    /// # Examples
    ///
    /// ```
    /// use skatemap::fetch::TraceContext;
    ///
    /// let context = TraceContext {
    ///     trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
    ///     parent_span_id: "00f067aa0ba902b7".to_string(),
    /// };
    /// assert_eq!(
    ///     context.traceparent(),
    ///     "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
    /// );
    /// ```
    #[must_use]
    pub fn traceparent(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.parent_span_id)
    }

    /// Rebuilds an OpenTelemetry context with this span as the remote parent.
    ///
    /// Returns `None` if either identifier is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates `FetchRequest` constructors that attach the current trace context.
macro_rules! fetch_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl FetchRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

fetch_request_builders! {
    load_all(LoadAll { ticket: LoadTicket }),
    create(Create { draft: NewLocationRecord }),
}

/// Requests issued by the engine for a host to execute against the remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchRequest {
    /// Fetch the complete park collection.
    LoadAll {
        ticket: LoadTicket,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Submit a new park. The draft has already passed validation.
    Create {
        draft: NewLocationRecord,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl FetchRequest {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadAll { trace_context, .. } | Self::Create { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadAll { .. } => "load_all",
            Self::Create { .. } => "create",
        }
    }
}

/// Outcomes of executed requests, fed back to the engine as events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchResponse {
    /// The collection was fetched and decoded.
    Loaded {
        ticket: LoadTicket,
        records: Vec<LocationRecord>,
    },

    /// A park was stored by the remote source.
    Created { record: LocationRecord },

    /// A request failed.
    Failed {
        /// Ticket of the failed load; `None` for a failed create.
        ticket: Option<LoadTicket>,
        kind: FailureKind,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_context_empty_without_a_tracer() {
        let request = FetchRequest::create(NewLocationRecord::default());
        assert_eq!(request.trace_context(), None);
        assert_eq!(request.name(), "create");
    }

    #[test]
    fn malformed_ids_do_not_build_a_context() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.to_otel_context().is_none());
    }
}
