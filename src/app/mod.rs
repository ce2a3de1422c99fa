//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host (the CLI binary, or a UI shell) and the
//! domain/storage/map/fetch layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: List criteria and quick filter holder
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`runtime`]: Executes actions against a remote source
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use skatemap::app::{handle_event, AppState, Event};
//! use skatemap::map::HeadlessSurface;
//!
//! let mut state = AppState::new(HeadlessSurface::new(), 100);
//! let (_render, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), skatemap::domain::SkatemapError>(())
//! ```

pub mod actions;
pub mod controller;
pub mod handler;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use controller::FilterSortController;
pub use handler::{handle_event, Event};
pub use runtime::process_event;
pub use state::AppState;
