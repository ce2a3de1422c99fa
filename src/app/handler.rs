//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host (user input or a completed remote request)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods, which recompute derived views
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Criteria**: `SetSearch`, `SetCategory`, `SetSortKey`, `SetSortDirection`,
//!   `ToggleSortDirection`, `SetQuickFilter`
//! - **Remote**: `Refresh`, `SubmitPark`, and `Fetch` carrying a response
//! - **Lifecycle**: `NavigateAway`

use crate::app::{Action, AppState};
use crate::domain::{NewLocationRecord, Result};
use crate::fetch::FetchResponse;
use crate::map::MapSurface;
use crate::view::{CategoryFilter, QuickFilter, SortDirection, SortKey};

/// Events triggered by user input or remote completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SetSearch(String),
    SetCategory(CategoryFilter),
    SetSortKey(SortKey),
    SetSortDirection(SortDirection),
    ToggleSortDirection,
    /// Changes the map-side quick filter; the list is unaffected.
    SetQuickFilter(QuickFilter),

    /// Reloads the full collection.
    Refresh,

    /// Submits a new park from the entry form.
    SubmitPark(NewLocationRecord),

    /// The user left the view; all markers must be released.
    NavigateAway,

    /// A remote request finished.
    Fetch(FetchResponse),
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::SetSearch(_) => "set_search",
            Self::SetCategory(_) => "set_category",
            Self::SetSortKey(_) => "set_sort_key",
            Self::SetSortDirection(_) => "set_sort_direction",
            Self::ToggleSortDirection => "toggle_sort_direction",
            Self::SetQuickFilter(_) => "set_quick_filter",
            Self::Refresh => "refresh",
            Self::SubmitPark(_) => "submit_park",
            Self::NavigateAway => "navigate_away",
            Self::Fetch(_) => "fetch",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the view must be re-rendered.
///
/// # Errors
///
/// Validation failures on `SubmitPark` are recorded in the state's error message and
/// produce no action rather than an error; the `Result` is reserved for failures the
/// host must see.
///
/// # Example
///
/// ```rust
/// use skatemap::app::{handle_event, Action, AppState, Event};
/// use skatemap::map::HeadlessSurface;
///
/// let mut state = AppState::new(HeadlessSurface::new(), 100);
/// let (render, actions) = handle_event(&mut state, &Event::Refresh)?;
/// assert!(render);
/// assert!(matches!(actions[0], Action::PostToRemote(_)));
/// # Ok::<(), skatemap::domain::SkatemapError>(())
/// ```
pub fn handle_event<S: MapSurface>(state: &mut AppState<S>, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::SetSearch(search) => Ok((state.set_search(search.as_str()), vec![])),
        Event::SetCategory(category) => Ok((state.set_category(category.clone()), vec![])),
        Event::SetSortKey(key) => Ok((state.set_sort_key(*key), vec![])),
        Event::SetSortDirection(direction) => Ok((state.set_sort_direction(*direction), vec![])),
        Event::ToggleSortDirection => Ok((state.toggle_sort_direction(), vec![])),
        Event::SetQuickFilter(filter) => Ok((state.set_quick_filter(*filter), vec![])),
        Event::Refresh => {
            let request = state.begin_load();
            Ok((true, vec![Action::PostToRemote(request)]))
        }
        Event::SubmitPark(draft) => match state.begin_create(draft.clone()) {
            Ok(request) => Ok((true, vec![Action::PostToRemote(request)])),
            Err(e) => {
                tracing::debug!(error = %e, "submission blocked by validation");
                Ok((true, vec![]))
            }
        },
        Event::NavigateAway => {
            state.teardown();
            Ok((false, vec![Action::CloseView]))
        }
        Event::Fetch(response) => {
            state.apply_response(response.clone());
            Ok((true, vec![]))
        }
    }
}
