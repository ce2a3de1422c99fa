//! Executes [`FetchRequest`]s against a [`RemoteSource`].

use super::messages::{FetchRequest, FetchResponse};
use crate::domain::SkatemapError;
use crate::remote::RemoteSource;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

fn failed(ticket: Option<super::LoadTicket>, error: &SkatemapError) -> FetchResponse {
    FetchResponse::Failed {
        ticket,
        kind: error.kind(),
        message: error.detail(),
    }
}

/// Runs one request and converts its outcome into a response.
///
/// The span covering the request is parented to the span that built the request,
/// when the request carries a trace context. Errors never escape; they become
/// [`FetchResponse::Failed`].
pub async fn dispatch(source: &dyn RemoteSource, request: FetchRequest) -> FetchResponse {
    let span = tracing::debug_span!("fetch_dispatch", request = request.name());
    if let Some(parent) = request.trace_context().and_then(|context| context.to_otel_context()) {
        span.set_parent(parent);
    }

    async move {
        match request {
            FetchRequest::LoadAll { ticket, .. } => match source.fetch_all().await {
                Ok(records) => FetchResponse::Loaded { ticket, records },
                Err(e) => failed(Some(ticket), &e),
            },
            FetchRequest::Create { draft, .. } => match source.submit(&draft).await {
                Ok(record) => FetchResponse::Created { record },
                Err(e) => failed(None, &e),
            },
        }
    }
    .instrument(span)
    .await
}
