//! Marker lifecycle: reconcile-by-identifier against the record collection.
//!
//! The manager keeps at most one marker per record identifier. Each
//! [`reconcile`](MarkerLifecycleManager::reconcile) pass:
//!
//! 1. Destroys markers whose record disappeared (or lost its coordinates).
//! 2. Recreates markers whose position, title, or style changed.
//! 3. Creates markers for placeable records that have none yet.
//! 4. Sets visibility from the predicate, touching the surface only on change.
//!
//! Filtering therefore never destroys or recreates a marker; only membership
//! changes in the record collection do.

use super::popup::InfoPopup;
use super::style::MarkerStyle;
use super::surface::{MapSurface, MarkerHandle};
use crate::domain::{GeoPoint, LocationRecord, RecordId};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
struct MarkerEntry {
    handle: MarkerHandle,
    visible: bool,
    position: GeoPoint,
    title: String,
    style: MarkerStyle,
}

impl MarkerEntry {
    fn is_current(&self, position: GeoPoint, title: &str, style: MarkerStyle) -> bool {
        self.position == position && self.title == title && self.style == style
    }
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub destroyed: usize,
    pub visibility_changes: usize,
}

/// Owns every marker on a [`MapSurface`], keyed by record identifier.
pub struct MarkerLifecycleManager<S: MapSurface> {
    surface: S,
    entries: BTreeMap<RecordId, MarkerEntry>,
    excerpt_len: usize,
}

impl<S: MapSurface> MarkerLifecycleManager<S> {
    pub fn new(surface: S, excerpt_len: usize) -> Self {
        Self {
            surface,
            entries: BTreeMap::new(),
            excerpt_len,
        }
    }

    /// Brings the surface in line with `records`, showing those matching `predicate`.
    ///
    /// After this returns, the number of live markers equals the number of distinct
    /// records that have coordinates.
    pub fn reconcile<F>(&mut self, records: &[LocationRecord], predicate: F) -> ReconcileStats
    where
        F: Fn(&LocationRecord) -> bool,
    {
        let _span = tracing::debug_span!("reconcile_markers", records = records.len()).entered();
        let mut stats = ReconcileStats::default();

        let placeable: HashSet<RecordId> = records
            .iter()
            .filter(|record| record.position.is_some())
            .map(|record| record.id)
            .collect();

        let orphans: Vec<RecordId> = self
            .entries
            .keys()
            .filter(|id| !placeable.contains(id))
            .copied()
            .collect();
        for id in orphans {
            if let Some(entry) = self.entries.remove(&id) {
                self.surface.destroy_marker(entry.handle);
                stats.destroyed += 1;
            }
        }

        let mut seen = HashSet::with_capacity(placeable.len());
        for record in records {
            let Some(position) = record.position else {
                continue;
            };
            if !seen.insert(record.id) {
                continue;
            }

            let title = record.display_name();
            let style = MarkerStyle::for_difficulty(&record.difficulty);
            let wanted = predicate(record);

            if let Some(entry) = self.entries.get(&record.id) {
                if !entry.is_current(position, title, style) {
                    tracing::debug!(id = %record.id, "marker content changed, recreating");
                    self.surface.destroy_marker(entry.handle);
                    self.entries.remove(&record.id);
                    stats.destroyed += 1;
                }
            }

            match self.entries.get_mut(&record.id) {
                Some(entry) => {
                    if entry.visible != wanted {
                        self.surface.set_visible(entry.handle, wanted);
                        entry.visible = wanted;
                        stats.visibility_changes += 1;
                    }
                }
                None => {
                    let handle = self.surface.create_marker(position, title, style);
                    let popup = InfoPopup::from_record(record, self.excerpt_len);
                    self.surface.attach_click_handler(handle, Box::new(move || popup.clone()));
                    if !wanted {
                        self.surface.set_visible(handle, false);
                    }
                    self.entries.insert(
                        record.id,
                        MarkerEntry {
                            handle,
                            visible: wanted,
                            position,
                            title: title.to_string(),
                            style,
                        },
                    );
                    stats.created += 1;
                }
            }
        }

        tracing::debug!(
            live = self.entries.len(),
            created = stats.created,
            destroyed = stats.destroyed,
            visibility_changes = stats.visibility_changes,
            "markers reconciled"
        );
        stats
    }

    /// Destroys every marker. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        for (_, entry) in std::mem::take(&mut self.entries) {
            self.surface.destroy_marker(entry.handle);
        }
        tracing::debug!(count, "markers torn down");
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn handle(&self, id: RecordId) -> Option<MarkerHandle> {
        self.entries.get(&id).map(|entry| entry.handle)
    }

    /// Whether the record's marker is shown, or `None` if it has no marker.
    #[must_use]
    pub fn is_visible(&self, id: RecordId) -> Option<bool> {
        self.entries.get(&id).map(|entry| entry.visible)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.visible).count()
    }
}

impl<S: MapSurface> Drop for MarkerLifecycleManager<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;
    use crate::map::HeadlessSurface;

    fn park(id: i64, name: &str, difficulty: Difficulty) -> LocationRecord {
        let mut record = LocationRecord::new(RecordId(id), name);
        record.difficulty = difficulty;
        record.position = GeoPoint::new(40.7 + id as f64 * 0.01, -111.9);
        record.description = Some(format!("{name} is a park"));
        record
    }

    fn sample() -> Vec<LocationRecord> {
        vec![
            park(1, "Alpha", Difficulty::Beginner),
            park(2, "Bravo", Difficulty::Advanced),
            park(3, "Charlie", Difficulty::Intermediate),
        ]
    }

    #[test]
    fn reconcile_creates_one_marker_per_record() {
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        let stats = manager.reconcile(&sample(), |_| true);

        assert_eq!(stats.created, 3);
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.surface().live_count(), 3);
        assert_eq!(manager.surface().visible_count(), 3);
    }

    #[test]
    fn repeated_reconcile_never_duplicates() {
        let records = sample();
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);
        let again = manager.reconcile(&records, |_| true);

        assert_eq!(again, ReconcileStats::default());
        assert_eq!(manager.surface().live_count(), 3);
        assert_eq!(manager.surface().created_total(), 3);
    }

    #[test]
    fn filtering_toggles_visibility_without_recreating() {
        let records = sample();
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);

        let stats = manager.reconcile(&records, |r| r.difficulty == Difficulty::Beginner);
        assert_eq!(stats.created, 0);
        assert_eq!(stats.destroyed, 0);
        assert_eq!(stats.visibility_changes, 2);
        assert_eq!(manager.surface().live_count(), 3);
        assert_eq!(manager.surface().visible_count(), 1);
        assert_eq!(manager.is_visible(RecordId(1)), Some(true));
        assert_eq!(manager.is_visible(RecordId(2)), Some(false));
        assert_eq!(manager.surface().created_total(), 3);
    }

    #[test]
    fn removed_records_lose_their_markers() {
        let mut records = sample();
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);

        records.remove(1);
        let stats = manager.reconcile(&records, |_| true);
        assert_eq!(stats.destroyed, 1);
        assert_eq!(manager.surface().live_count(), 2);
        assert!(manager.handle(RecordId(2)).is_none());
    }

    #[test]
    fn records_without_coordinates_get_no_marker() {
        let mut records = sample();
        records[0].position = None;
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.is_visible(RecordId(1)), None);
    }

    #[test]
    fn changed_position_recreates_the_marker() {
        let mut records = sample();
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);
        let before = manager.handle(RecordId(3));

        records[2].position = GeoPoint::new(41.0, -112.0);
        let stats = manager.reconcile(&records, |_| true);
        assert_eq!(stats.created, 1);
        assert_eq!(stats.destroyed, 1);
        assert_ne!(manager.handle(RecordId(3)), before);
        assert_eq!(manager.surface().live_count(), 3);
    }

    #[test]
    fn hidden_on_creation_when_predicate_rejects() {
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&sample(), |r| r.has_lighting);

        assert_eq!(manager.surface().live_count(), 3);
        assert_eq!(manager.surface().visible_count(), 0);
    }

    #[test]
    fn click_opens_popup_for_the_record() {
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 5);
        manager.reconcile(&sample(), |_| true);

        let handle = manager.handle(RecordId(2)).expect("marker exists");
        let popup = manager.surface().click(handle).expect("click handler attached");
        assert_eq!(popup.title, "Bravo");
        assert_eq!(popup.excerpt, "Bravo...");
        assert_eq!(popup.details_path, "/parks/2");
    }

    #[test]
    fn teardown_destroys_everything_once() {
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&sample(), |_| true);
        manager.teardown();
        manager.teardown();

        assert!(manager.is_empty());
        assert_eq!(manager.surface().live_count(), 0);
        assert_eq!(manager.surface().destroyed_total(), 3);
    }

    #[test]
    fn duplicate_ids_in_input_are_placed_once() {
        let mut records = sample();
        records.push(park(1, "Alpha", Difficulty::Beginner));
        let mut manager = MarkerLifecycleManager::new(HeadlessSurface::new(), 100);
        manager.reconcile(&records, |_| true);
        assert_eq!(manager.surface().live_count(), 3);
    }
}
