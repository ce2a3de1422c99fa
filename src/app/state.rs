//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the container that wires the record store, the
//! filter/sort controller, the fetch coordinator, and the marker manager together.
//!
//! # Architecture
//!
//! `AppState` separates core data (the record store) from derived state (the filtered
//! list and the marker set). Every mutation that can affect a derived view recomputes
//! it before returning, so reads never observe stale derivations:
//!
//! - Store changes (load, create) recompute the list and reconcile markers.
//! - List criteria changes recompute the list only.
//! - Quick filter changes reconcile markers only, which toggles visibility.
//!
//! # Example
//!
//! ```rust
//! use skatemap::app::AppState;
//! use skatemap::map::HeadlessSurface;
//! use skatemap::view::SortKey;
//!
//! let mut state = AppState::new(HeadlessSurface::new(), 100);
//! state.set_sort_key(SortKey::Difficulty);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.rows.is_empty());
//! ```

use super::controller::FilterSortController;
use crate::domain::{LocationRecord, NewLocationRecord, RecordId, Result, SkatemapError};
use crate::fetch::{FetchCoordinator, FetchRequest, FetchResponse, LoadTicket, LoadingState};
use crate::map::{MapSurface, MarkerLifecycleManager};
use crate::remote::RemoteSource;
use crate::storage::RecordStore;
use crate::view::{
    derive, CategoryFilter, ListRow, ListViewModel, ParkDetail, QuickFilter, SortDirection, SortKey,
};

/// Central application state container.
pub struct AppState<S: MapSurface> {
    store: RecordStore,
    controller: FilterSortController,
    fetch: FetchCoordinator,
    markers: MarkerLifecycleManager<S>,

    /// Output of the last list derivation.
    filtered: Vec<LocationRecord>,

    /// Success message from the last create.
    notice: Option<String>,

    excerpt_len: usize,

    /// Set once the view is torn down; markers are never drawn again after that.
    closed: bool,
}

impl<S: MapSurface> AppState<S> {
    /// Creates an empty state drawing markers on `surface`.
    #[must_use]
    pub fn new(surface: S, excerpt_len: usize) -> Self {
        Self {
            store: RecordStore::new(),
            controller: FilterSortController::new(),
            fetch: FetchCoordinator::new(),
            markers: MarkerLifecycleManager::new(surface, excerpt_len),
            filtered: Vec::new(),
            notice: None,
            excerpt_len,
            closed: false,
        }
    }

    /// Records in the list view, filtered and sorted by the current criteria.
    #[must_use]
    pub fn filtered_records(&self) -> &[LocationRecord] {
        &self.filtered
    }

    #[must_use]
    pub const fn loading_state(&self) -> LoadingState {
        self.fetch.loading_state()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.fetch.error_message()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub const fn controller(&self) -> &FilterSortController {
        &self.controller
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerLifecycleManager<S> {
        &self.markers
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let changed = self.controller.set_search(search);
        if changed {
            self.refresh_list();
        }
        changed
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> bool {
        let changed = self.controller.set_category(category);
        if changed {
            self.refresh_list();
        }
        changed
    }

    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        let changed = self.controller.set_sort_key(key);
        if changed {
            self.refresh_list();
        }
        changed
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        let changed = self.controller.set_sort_direction(direction);
        if changed {
            self.refresh_list();
        }
        changed
    }

    pub fn toggle_sort_direction(&mut self) -> bool {
        let changed = self.controller.toggle_sort_direction();
        if changed {
            self.refresh_list();
        }
        changed
    }

    pub fn set_quick_filter(&mut self, filter: QuickFilter) -> bool {
        let changed = self.controller.set_quick_filter(filter);
        if changed {
            self.refresh_markers();
        }
        changed
    }

    fn refresh_list(&mut self) {
        self.filtered = derive(self.store.all(), self.controller.criteria());
        tracing::debug!(
            shown = self.filtered.len(),
            total = self.store.len(),
            revision = self.store.revision(),
            "list recomputed"
        );
    }

    fn refresh_markers(&mut self) {
        if self.closed {
            tracing::debug!(revision = self.store.revision(), "view closed, markers not redrawn");
            return;
        }
        let quick_filter = self.controller.quick_filter();
        self.markers.reconcile(self.store.all(), |record| quick_filter.matches(record));
    }

    fn refresh_views(&mut self) {
        self.refresh_list();
        self.refresh_markers();
    }

    /// Starts a load and returns the request for the host to execute.
    pub fn begin_load(&mut self) -> FetchRequest {
        let ticket = self.fetch.begin_load();
        FetchRequest::load_all(ticket)
    }

    /// Validates a draft and returns the create request for the host to execute.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Validation`] if the draft is invalid; the message is
    /// also exposed through [`AppState::error_message`].
    pub fn begin_create(&mut self, draft: NewLocationRecord) -> Result<FetchRequest> {
        self.notice = None;
        self.fetch.check_draft(&draft)?;
        Ok(FetchRequest::create(draft))
    }

    /// Applies an executed request's outcome.
    ///
    /// Returns `true` when the store changed, in which case every derived view has
    /// already been recomputed.
    pub fn apply_response(&mut self, response: FetchResponse) -> bool {
        match response {
            FetchResponse::Loaded { ticket, records } => {
                self.finish_load(ticket, Ok(records));
                true
            }
            FetchResponse::Created { record } => self.finish_create(Ok(record)),
            FetchResponse::Failed { ticket: Some(ticket), kind, message } => {
                self.finish_load(ticket, Err(SkatemapError::from_kind(kind, message)));
                false
            }
            FetchResponse::Failed { ticket: None, kind, message } => {
                self.finish_create(Err(SkatemapError::from_kind(kind, message)))
            }
        }
    }

    fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<LocationRecord>>) {
        if self.fetch.complete_load(ticket, outcome, &mut self.store).is_ok() {
            self.refresh_views();
        }
    }

    fn finish_create(&mut self, outcome: Result<LocationRecord>) -> bool {
        match self.fetch.complete_create(outcome, &mut self.store) {
            Ok(record) => {
                self.announce_created(&record);
                true
            }
            Err(_) => false,
        }
    }

    fn announce_created(&mut self, record: &LocationRecord) {
        self.notice = Some(format!(
            "Successfully added {} to the database!",
            record.display_name()
        ));
        self.refresh_views();
    }

    /// Loads the collection directly from `source`.
    ///
    /// Failures are recorded in the loading state and error message, never returned.
    pub async fn load(&mut self, source: &dyn RemoteSource) {
        let ticket = self.fetch.begin_load();
        let outcome = source.fetch_all().await;
        self.finish_load(ticket, outcome);
    }

    /// Validates and submits `draft` directly to `source`.
    ///
    /// # Errors
    ///
    /// Returns the validation, network, or payload error after recording its message.
    pub async fn create(&mut self, source: &dyn RemoteSource, draft: &NewLocationRecord) -> Result<RecordId> {
        self.notice = None;
        self.fetch.check_draft(draft)?;
        let outcome = source.submit(draft).await;
        let record = self.fetch.complete_create(outcome, &mut self.store)?;
        self.announce_created(&record);
        Ok(record.id)
    }

    /// Records shown in the list under the map: the quick filter applied in store order.
    #[must_use]
    pub fn map_records(&self) -> Vec<&LocationRecord> {
        let quick_filter = self.controller.quick_filter();
        self.store
            .all()
            .iter()
            .filter(|record| quick_filter.matches(record))
            .collect()
    }

    #[must_use]
    pub fn detail(&self, id: RecordId) -> Option<ParkDetail> {
        self.store.get(id).map(ParkDetail::from_record)
    }

    /// Computes the list view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        ListViewModel {
            rows: self
                .filtered
                .iter()
                .map(|record| ListRow::from_record(record, self.excerpt_len))
                .collect(),
            loading: self.loading_state(),
            error: self.error_message().map(str::to_string),
            notice: self.notice.clone(),
            total: self.store.len(),
        }
    }

    /// Releases every marker on the surface and closes the view.
    ///
    /// Completions that arrive afterwards still update the store and the list, but no
    /// marker is created again.
    pub fn teardown(&mut self) {
        self.closed = true;
        self.markers.teardown();
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}
