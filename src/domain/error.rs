//! Error types for the skatemap engine.
//!
//! This module defines the centralized error type [`SkatemapError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.
//!
//! Network and payload failures are caught by the fetch coordinator and turned into
//! user-visible messages; validation failures are raised before any request is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for skatemap operations.
///
/// # Examples
///
/// ```
/// use skatemap::domain::SkatemapError;
///
/// fn check_latitude(lat: f64) -> Result<(), SkatemapError> {
///     if (-90.0..=90.0).contains(&lat) {
///         Ok(())
///     } else {
///         Err(SkatemapError::Validation("latitude out of range".to_string()))
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum SkatemapError {
    /// The remote source could not be reached or answered with a non-success status.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote source answered successfully but the payload did not match the
    /// expected record schema.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A record submitted by the user failed local validation.
    ///
    /// Raised before any network call is attempted.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SkatemapError {
    /// Classifies the error for transport across the fetch protocol.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Io(_) => FailureKind::Network,
            Self::InvalidResponse(_) => FailureKind::InvalidResponse,
            Self::Validation(_) | Self::Config(_) => FailureKind::Validation,
        }
    }

    /// Returns the message without the variant prefix.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Network(m)
            | Self::InvalidResponse(m)
            | Self::Validation(m)
            | Self::Config(m) => m.clone(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Rebuilds an error from a serialized failure.
    #[must_use]
    pub fn from_kind(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            FailureKind::Network => Self::Network(message),
            FailureKind::InvalidResponse => Self::InvalidResponse(message),
            FailureKind::Validation => Self::Validation(message),
        }
    }
}

/// Coarse failure category carried in fetch responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Network,
    InvalidResponse,
    Validation,
}

/// A specialized `Result` type for skatemap operations.
pub type Result<T> = std::result::Result<T, SkatemapError>;
