//! Storage layer holding the authoritative record collection.
//!
//! The engine keeps no durable state: every session rebuilds the store from a fresh
//! fetch. [`RecordStore`] is the in-memory collection that derived views are computed
//! from.

pub mod record_store;

pub use record_store::RecordStore;
