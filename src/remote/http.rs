//! HTTP implementation of [`RemoteSource`].

use super::backend::RemoteSource;
use super::wire::{decode_collection, decode_created, error_message, WireDraft};
use crate::domain::{LocationRecord, NewLocationRecord, Result, SkatemapError};
use crate::fetch::TraceContext;
use std::time::Duration;
use tracing::Instrument;

/// Remote source reached over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    records_url: String,
    create_url: String,
}

impl HttpSource {
    /// Creates a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, records_path: &str, create_path: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkatemapError::Config(format!("failed to build HTTP client: {e}")))?;

        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client,
            records_url: format!("{base}{records_path}"),
            create_url: format!("{base}{create_path}"),
        })
    }

    #[must_use]
    pub fn records_url(&self) -> &str {
        &self.records_url
    }

    #[must_use]
    pub fn create_url(&self) -> &str {
        &self.create_url
    }

    fn with_trace_header(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match TraceContext::from_current() {
            Some(context) => request.header("traceparent", context.traceparent()),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SkatemapError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| format!("server responded with {status}"));
            tracing::warn!(%status, %message, "remote source returned an error status");
            return Err(SkatemapError::Network(message));
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<LocationRecord>> {
        let span = tracing::debug_span!("http_fetch_all", url = %self.records_url);
        async {
            let response = Self::with_trace_header(self.client.get(&self.records_url))
                .send()
                .await
                .map_err(|e| SkatemapError::Network(e.to_string()))?;
            let body = Self::read_body(response).await?;
            decode_collection(&body)
        }
        .instrument(span)
        .await
    }

    async fn submit(&self, draft: &NewLocationRecord) -> Result<LocationRecord> {
        let span = tracing::debug_span!("http_submit", url = %self.create_url, name = %draft.name);
        async {
            let today = chrono::Local::now().date_naive();
            let response = Self::with_trace_header(self.client.post(&self.create_url))
                .json(&WireDraft::new(draft, today))
                .send()
                .await
                .map_err(|e| SkatemapError::Network(e.to_string()))?;
            let body = Self::read_body(response).await?;
            decode_created(&body)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let source = HttpSource::new(
            "http://localhost:3000/",
            "/api/skateparks",
            "/api/skateparks/addpark",
            Duration::from_secs(5),
        )
        .expect("client builds");
        assert_eq!(source.records_url(), "http://localhost:3000/api/skateparks");
        assert_eq!(source.create_url(), "http://localhost:3000/api/skateparks/addpark");
    }
}
