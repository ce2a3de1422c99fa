//! Detail popup shown when a marker is clicked.

use crate::domain::{LocationRecord, RecordId};
use crate::view::details_path;

/// Popup content, captured from the record when its marker is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPopup {
    pub record_id: RecordId,
    pub title: String,
    /// Description truncated to the configured excerpt length.
    pub excerpt: String,
    pub difficulty: String,
    pub hours: String,
    pub details_path: String,
}

impl InfoPopup {
    #[must_use]
    pub fn from_record(record: &LocationRecord, excerpt_len: usize) -> Self {
        Self {
            record_id: record.id,
            title: record.display_name().to_string(),
            excerpt: record.description_excerpt(excerpt_len),
            difficulty: record.difficulty.to_string(),
            hours: record.hours_display(),
            details_path: details_path(record.id),
        }
    }
}
