//! View derivation: criteria, the pure list deriver, and display view models.
//!
//! # Modules
//!
//! - [`criteria`]: List criteria and the map quick filter
//! - [`derive`](mod@derive): Pure filter-and-sort projection of the record collection
//! - [`viewmodel`]: Display-ready list rows and park detail

pub mod criteria;
pub mod derive;
pub mod viewmodel;

pub use criteria::{CategoryFilter, FilterSortCriteria, QuickFilter, SortDirection, SortKey};
pub use derive::derive;
pub use viewmodel::{details_path, ListRow, ListViewModel, ParkDetail};
