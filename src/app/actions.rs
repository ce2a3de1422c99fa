//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The host
//! executes them in order: remote requests are dispatched and their responses fed back
//! as [`Event::Fetch`](crate::app::Event::Fetch).
//!
//! # Example
//!
//! ```rust
//! use skatemap::app::Action;
//! use skatemap::domain::NewLocationRecord;
//! use skatemap::fetch::FetchRequest;
//!
//! let actions = vec![Action::PostToRemote(FetchRequest::create(NewLocationRecord::default()))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::fetch::FetchRequest;

/// Commands the host executes on behalf of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Execute a request against the remote source.
    PostToRemote(FetchRequest),

    /// The view was left; the host should close it. Markers are already released.
    CloseView,
}
