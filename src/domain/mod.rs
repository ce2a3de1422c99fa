//! Domain layer for the skatemap engine.
//!
//! This module contains the core domain types, independent of the transport, the map
//! surface, and the hosting UI.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Location record model, enumerations, and the create payload
//! - [`feature`]: Feature descriptors and category grouping
//!
//! # Examples
//!
//! ```
//! use skatemap::domain::{Difficulty, LocationRecord, RecordId};
//!
//! let mut park = LocationRecord::new(RecordId(2), "9th & 9th");
//! park.difficulty = Difficulty::Advanced;
//! assert_eq!(park.difficulty.rank(), 3);
//! ```

pub mod error;
pub mod feature;
pub mod record;

pub use error::{FailureKind, Result, SkatemapError};
pub use feature::{group_by_category, FeatureRef, OTHER_CATEGORY};
pub use record::{
    Difficulty, GeoPoint, LocationRecord, NewLocationRecord, RecordId, Status,
    DEFAULT_VARIABLE_CLOSING, UNKNOWN_RANK,
};
