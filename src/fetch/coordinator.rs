//! Load and create orchestration over a [`RemoteSource`].
//!
//! # Architecture
//!
//! The coordinator owns the loading state machine and the last error message; the
//! record store is passed in by the caller so the coordinator never holds on to it.
//! Work can be driven two ways:
//!
//! - Directly, with [`FetchCoordinator::load`] and [`FetchCoordinator::create`].
//! - Through messages: [`FetchCoordinator::begin_load`] issues a [`LoadTicket`], the
//!   host executes the request (see [`dispatch`](super::dispatch)), and the outcome is
//!   applied with [`FetchCoordinator::complete_load`].
//!
//! Overlapping loads are not cancelled. Completions apply in arrival order, so the
//! load that finishes last owns the store. The state stays `Loading` until no load
//! is in flight.

use crate::domain::{LocationRecord, NewLocationRecord, Result, SkatemapError};
use crate::remote::RemoteSource;
use crate::storage::RecordStore;
use serde::{Deserialize, Serialize};

/// Message shown when the collection could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load skatepark data. Please try again later.";

/// Loading state of the park collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

impl LoadingState {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Identifies one issued load. Tickets increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchCoordinator {
    state: LoadingState,
    error: Option<String>,
    issued: u64,
    pending: usize,
}

impl FetchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn loading_state(&self) -> LoadingState {
        self.state
    }

    /// Human-readable message for the last failed load or create, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of loads issued but not yet completed.
    #[must_use]
    pub const fn pending_loads(&self) -> usize {
        self.pending
    }

    /// Enters `Loading` and issues a ticket for the new load.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.pending += 1;
        self.state = LoadingState::Loading;
        let ticket = LoadTicket(self.issued);
        tracing::debug!(ticket = ticket.sequence(), pending = self.pending, "load started");
        ticket
    }

    /// Applies the outcome of a load.
    ///
    /// On success the store is replaced exactly once and the number of stored records
    /// is returned. On failure the store is left untouched and the error message is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns the load's error after recording it.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<LocationRecord>>,
        store: &mut RecordStore,
    ) -> Result<usize> {
        self.pending = self.pending.saturating_sub(1);
        if ticket.sequence() < self.issued {
            tracing::debug!(
                ticket = ticket.sequence(),
                latest = self.issued,
                "applying completion of an older load"
            );
        }

        match outcome {
            Ok(records) => {
                let stored = store.replace_all(records);
                self.state = self.settled_or_loading(LoadingState::Success);
                self.error = None;
                tracing::debug!(ticket = ticket.sequence(), stored, pending = self.pending, "load succeeded");
                Ok(stored)
            }
            Err(e) => {
                tracing::warn!(ticket = ticket.sequence(), error = %e, pending = self.pending, "load failed");
                self.state = self.settled_or_loading(LoadingState::Failure);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Loads still in flight keep the state at `Loading`.
    const fn settled_or_loading(&self, settled: LoadingState) -> LoadingState {
        if self.pending > 0 {
            LoadingState::Loading
        } else {
            settled
        }
    }

    /// Applies the outcome of a create, appending the record on success.
    ///
    /// # Errors
    ///
    /// Returns the create's error after recording its message, or
    /// [`SkatemapError::InvalidResponse`] if the returned record's id is already stored.
    pub fn complete_create(
        &mut self,
        outcome: Result<LocationRecord>,
        store: &mut RecordStore,
    ) -> Result<LocationRecord> {
        match outcome {
            Ok(record) => {
                if !store.append(record.clone()) {
                    let e = SkatemapError::InvalidResponse(format!(
                        "Server returned park {}, which is already listed",
                        record.id
                    ));
                    tracing::warn!(id = %record.id, "created record duplicates a stored id");
                    self.error = Some(e.detail());
                    return Err(e);
                }
                self.error = None;
                tracing::debug!(id = %record.id, "create succeeded");
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                self.error = Some(e.detail());
                Err(e)
            }
        }
    }

    /// Validates a draft before submission, recording the message on failure.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Validation`](crate::domain::SkatemapError::Validation)
    /// describing the first problem found.
    pub fn check_draft(&mut self, draft: &NewLocationRecord) -> Result<()> {
        draft.validate().map_err(|e| {
            tracing::debug!(error = %e, "draft rejected before submission");
            self.error = Some(e.detail());
            e
        })
    }

    /// Loads the full collection from `source` into `store`.
    ///
    /// # Errors
    ///
    /// Returns the network or payload error; the store is unchanged in that case.
    pub async fn load(&mut self, source: &dyn RemoteSource, store: &mut RecordStore) -> Result<usize> {
        let ticket = self.begin_load();
        let outcome = source.fetch_all().await;
        self.complete_load(ticket, outcome, store)
    }

    /// Validates `draft`, submits it, and appends the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Validation`](crate::domain::SkatemapError::Validation)
    /// without contacting the source if the draft is invalid, otherwise the source's
    /// error. The store is unchanged on any error.
    pub async fn create(
        &mut self,
        source: &dyn RemoteSource,
        store: &mut RecordStore,
        draft: &NewLocationRecord,
    ) -> Result<LocationRecord> {
        self.check_draft(draft)?;
        let outcome = source.submit(draft).await;
        self.complete_create(outcome, store)
    }
}
