//! Fetch coordination: the loading state machine and the request/response protocol.
//!
//! # Modules
//!
//! - [`coordinator`]: [`FetchCoordinator`], [`LoadingState`], and load tickets
//! - [`messages`]: [`FetchRequest`] / [`FetchResponse`] with trace propagation
//! - [`dispatch`](mod@dispatch): Executes a request against a remote source

pub mod coordinator;
pub mod dispatch;
pub mod messages;

pub use coordinator::{FetchCoordinator, LoadTicket, LoadingState, LOAD_ERROR_MESSAGE};
pub use dispatch::dispatch;
pub use messages::{FetchRequest, FetchResponse, TraceContext};
