//! Remote park source: the trait, its HTTP implementation, and the wire format.
//!
//! # Modules
//!
//! - [`backend`]: [`RemoteSource`] trait
//! - [`http`]: [`HttpSource`] over `reqwest`
//! - [`wire`]: Payload decoding and the create request body

pub mod backend;
pub mod http;
pub mod wire;

pub use backend::RemoteSource;
pub use http::HttpSource;
