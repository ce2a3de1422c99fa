//! Remote source abstraction.
//!
//! This module defines the [`RemoteSource`] trait the fetch coordinator talks to. The
//! coordinator never builds requests itself; swapping the HTTP source for an in-memory
//! one changes no engine logic.

use crate::domain::{LocationRecord, NewLocationRecord, Result};

/// Abstraction over the service that owns the park records.
///
/// # Implementations
///
/// - [`HttpSource`](crate::remote::HttpSource): JSON over HTTP via `reqwest`
///
/// # Examples
///
/// ```no_run
/// use skatemap::remote::{HttpSource, RemoteSource};
/// use std::time::Duration;
///
/// # async fn run() -> skatemap::domain::Result<()> {
/// let source = HttpSource::new(
///     "http://localhost:3000",
///     "/api/skateparks",
///     "/api/skateparks/addpark",
///     Duration::from_secs(10),
/// )?;
/// let parks = source.fetch_all().await?;
/// println!("{} parks", parks.len());
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait RemoteSource: Send + Sync {
    /// Retrieves the complete park collection.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Network`](crate::domain::SkatemapError::Network) if the
    /// source is unreachable or answers with a non-success status, and
    /// [`SkatemapError::InvalidResponse`](crate::domain::SkatemapError::InvalidResponse)
    /// if the payload does not decode.
    async fn fetch_all(&self) -> Result<Vec<LocationRecord>>;

    /// Submits a new park and returns the stored record with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Same classification as [`RemoteSource::fetch_all`].
    async fn submit(&self, draft: &NewLocationRecord) -> Result<LocationRecord>;
}
