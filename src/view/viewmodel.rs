//! View model types representing renderable list and detail state.
//!
//! View models are computed from `AppState` snapshots and consumed by whatever renders
//! them (the CLI prints them; a UI host would bind them). They hold display-ready
//! data only, no business logic.

use crate::domain::{group_by_category, FeatureRef, LocationRecord, RecordId};
use crate::fetch::LoadingState;

/// Renderable list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel {
    pub rows: Vec<ListRow>,

    pub loading: LoadingState,

    /// Human-readable error from the last failed load or create.
    pub error: Option<String>,

    /// Success notice from the last create.
    pub notice: Option<String>,

    /// Number of records in the store before filtering.
    pub total: usize,
}

impl ListViewModel {
    /// `"Showing N of M parks"` header text.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Showing {} of {} parks", self.rows.len(), self.total)
    }
}

/// One row of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: RecordId,
    pub name: String,
    pub excerpt: String,
    pub difficulty: String,
    pub status: String,
    pub hours: String,
    pub has_lighting: bool,
    /// Route of the detail page for this park.
    pub details_path: String,
}

impl ListRow {
    #[must_use]
    pub fn from_record(record: &LocationRecord, excerpt_len: usize) -> Self {
        Self {
            id: record.id,
            name: record.display_name().to_string(),
            excerpt: record.description_excerpt(excerpt_len),
            difficulty: record.difficulty.to_string(),
            status: record.status.to_string(),
            hours: record.hours_display(),
            has_lighting: record.has_lighting,
            details_path: details_path(record.id),
        }
    }
}

/// Detail page for a single park.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkDetail {
    pub id: RecordId,
    pub name: String,
    pub difficulty: String,
    pub status: String,
    pub has_lighting: bool,
    pub description: String,
    pub hours: String,
    pub address: String,
    pub website: Option<String>,
    /// Features grouped by category in first-appearance order.
    pub feature_groups: Vec<(String, Vec<FeatureRef>)>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub directions_url: Option<String>,
    pub last_updated: Option<String>,
}

impl ParkDetail {
    #[must_use]
    pub fn from_record(record: &LocationRecord) -> Self {
        Self {
            id: record.id,
            name: record.display_name().to_string(),
            difficulty: record.difficulty.to_string(),
            status: record.status.to_string(),
            has_lighting: record.has_lighting,
            description: record.description.clone().unwrap_or_default(),
            hours: record.hours_display(),
            address: record.address.clone().unwrap_or_default(),
            website: record.website.clone(),
            feature_groups: group_by_category(&record.features),
            latitude: record.position.map(|p| p.lat()),
            longitude: record.position.map(|p| p.lng()),
            directions_url: record.directions_url(),
            last_updated: record.last_updated.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Route of a park's detail page.
#[must_use]
pub fn details_path(id: RecordId) -> String {
    format!("/parks/{id}")
}
