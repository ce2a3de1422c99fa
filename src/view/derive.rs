//! Pure derivation of the list view from the record collection.
//!
//! [`derive`] filters by search text and difficulty category, then sorts by the
//! selected key and direction. It never mutates its input and returns a fresh
//! sequence, so it can be called after every criteria change without side effects.
//!
//! # Algorithm
//!
//! 1. **Search**: the trimmed, lowercased query must be a substring of the lowercased
//!    name, description, or address. An empty query passes every record. With a
//!    non-empty query, records missing any of those three fields are excluded.
//! 2. **Category**: unless the filter is `all`, the record's difficulty must equal it
//!    exactly.
//! 3. **Sort**: stable sort on name, difficulty rank, or status rank; descending
//!    inverts the comparison so ties keep their original relative order either way.

use super::criteria::{FilterSortCriteria, SortDirection, SortKey};
use crate::domain::LocationRecord;
use std::cmp::Ordering;

/// Computes the filtered and sorted list view.
///
/// # Example
///
/// ```
/// use skatemap::domain::{Difficulty, LocationRecord, RecordId};
/// use skatemap::view::{derive, FilterSortCriteria, SortDirection, SortKey};
///
/// let mut fairmont = LocationRecord::new(RecordId(1), "Fairmont");
/// fairmont.difficulty = Difficulty::Beginner;
/// let mut ninth = LocationRecord::new(RecordId(2), "9th & 9th");
/// ninth.difficulty = Difficulty::Advanced;
///
/// let criteria = FilterSortCriteria {
///     sort_key: SortKey::Difficulty,
///     direction: SortDirection::Descending,
///     ..Default::default()
/// };
/// let view = derive(&[fairmont, ninth], &criteria);
/// assert_eq!(view[0].id, RecordId(2));
/// ```
#[must_use]
pub fn derive(records: &[LocationRecord], criteria: &FilterSortCriteria) -> Vec<LocationRecord> {
    let _span = tracing::debug_span!("derive_view",
        total_records = records.len(),
        query_len = criteria.search.len(),
        category = %criteria.category,
        sort_key = ?criteria.sort_key,
        direction = ?criteria.direction
    ).entered();

    let query = criteria.search.trim().to_lowercase();

    let mut view: Vec<LocationRecord> = records
        .iter()
        .filter(|record| matches_search(record, &query))
        .filter(|record| criteria.category.matches(&record.difficulty))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare(a, b, criteria.sort_key);
        match criteria.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    tracing::debug!(derived_count = view.len(), "list view derived");
    view
}

/// Search predicate over name, description, and address.
///
/// `query` must already be trimmed and lowercased.
fn matches_search(record: &LocationRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let (Some(name), Some(description), Some(address)) = (
        record.name.as_deref(),
        record.description.as_deref(),
        record.address.as_deref(),
    ) else {
        tracing::trace!(record_id = %record.id, "excluding record missing a searchable field");
        return false;
    };

    [name, description, address]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Ascending comparator for a sort key.
///
/// Records without a name sort after every named record.
fn compare(a: &LocationRecord, b: &LocationRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => match (a.name.as_deref(), b.name.as_deref()) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, RecordId, Status};
    use crate::view::criteria::CategoryFilter;

    fn park(id: i64, name: &str, difficulty: &str, status: &str) -> LocationRecord {
        let mut record = LocationRecord::new(RecordId(id), name);
        record.difficulty = Difficulty::from(difficulty);
        record.status = Status::from(status);
        record.description = Some(format!("{name} description"));
        record.address = Some(format!("{id} Main St, Salt Lake City"));
        record
    }

    fn ids(view: &[LocationRecord]) -> Vec<i64> {
        view.iter().map(|r| r.id.0).collect()
    }

    fn two_parks() -> Vec<LocationRecord> {
        vec![
            park(1, "Fairmont", "Beginner", "Active"),
            park(2, "9th & 9th", "Advanced", "Active"),
        ]
    }

    fn by(sort_key: SortKey, direction: SortDirection) -> FilterSortCriteria {
        FilterSortCriteria { sort_key, direction, ..Default::default() }
    }

    #[test]
    fn difficulty_sort_in_both_directions() {
        let records = two_parks();
        assert_eq!(ids(&derive(&records, &by(SortKey::Difficulty, SortDirection::Ascending))), vec![1, 2]);
        assert_eq!(ids(&derive(&records, &by(SortKey::Difficulty, SortDirection::Descending))), vec![2, 1]);
    }

    #[test]
    fn search_matches_a_substring_of_the_name() {
        let criteria = FilterSortCriteria { search: "9th".to_string(), ..Default::default() };
        assert_eq!(ids(&derive(&two_parks(), &criteria)), vec![2]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive_across_fields() {
        let mut records = two_parks();
        records[0].address = Some("1040 E Sugarmont Dr".to_string());
        let criteria = FilterSortCriteria { search: "  SUGARMONT ".to_string(), ..Default::default() };
        assert_eq!(ids(&derive(&records, &criteria)), vec![1]);
    }

    #[test]
    fn category_without_matches_yields_an_empty_view() {
        let criteria = FilterSortCriteria {
            category: CategoryFilter::Only(Difficulty::Intermediate),
            ..Default::default()
        };
        assert!(derive(&two_parks(), &criteria).is_empty());
    }

    #[test]
    fn unrecognized_difficulty_sorts_after_known_values() {
        let records = vec![
            park(1, "A", "Expert", "Active"),
            park(2, "B", "All-Levels", "Active"),
            park(3, "C", "Beginner", "Active"),
        ];
        let view = derive(&records, &by(SortKey::Difficulty, SortDirection::Ascending));
        assert_eq!(ids(&view), vec![3, 2, 1]);
    }

    #[test]
    fn status_sort_uses_the_fixed_rank_order() {
        let records = vec![
            park(1, "A", "Beginner", "Closed"),
            park(2, "B", "Beginner", "Under Construction"),
            park(3, "C", "Beginner", "Active"),
            park(4, "D", "Beginner", "Temporarily Closed"),
            park(5, "E", "Beginner", "Demolished"),
        ];
        let view = derive(&records, &by(SortKey::Status, SortDirection::Ascending));
        assert_eq!(ids(&view), vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn ties_keep_original_order_in_both_directions() {
        let records = vec![
            park(1, "A", "Advanced", "Active"),
            park(2, "B", "Beginner", "Active"),
            park(3, "C", "Advanced", "Active"),
            park(4, "D", "Beginner", "Active"),
            park(5, "E", "Advanced", "Active"),
        ];
        let asc = derive(&records, &by(SortKey::Difficulty, SortDirection::Ascending));
        assert_eq!(ids(&asc), vec![2, 4, 1, 3, 5]);
        let desc = derive(&records, &by(SortKey::Difficulty, SortDirection::Descending));
        assert_eq!(ids(&desc), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn empty_criteria_return_every_record_once() {
        let records = vec![
            park(1, "A", "Beginner", "Active"),
            park(2, "B", "Mystery", "Rumored"),
            park(3, "C", "Advanced", "Closed"),
        ];
        let view = derive(&records, &FilterSortCriteria::default());
        assert_eq!(view, records);
    }

    #[test]
    fn derivation_is_idempotent() {
        let records = vec![
            park(1, "Jordan", "Intermediate", "Active"),
            park(2, "Fairmont", "Beginner", "Closed"),
            park(3, "Fairmont", "Beginner", "Active"),
        ];
        for key in [SortKey::Name, SortKey::Difficulty, SortKey::Status] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let criteria = by(key, direction);
                let once = derive(&records, &criteria);
                assert_eq!(derive(&records, &criteria), once);
                assert_eq!(derive(&once, &criteria), once);
            }
        }
    }

    #[test]
    fn records_missing_searchable_fields_are_excluded_not_fatal() {
        let mut records = two_parks();
        records[0].name = None;
        records.push(park(3, "Fairmont North", "Beginner", "Active"));

        let criteria = FilterSortCriteria { search: "fair".to_string(), ..Default::default() };
        assert_eq!(ids(&derive(&records, &criteria)), vec![3]);

        // Without a search the nameless record is still listed, after named ones.
        let by_name = derive(&records, &by(SortKey::Name, SortDirection::Ascending));
        assert_eq!(ids(&by_name), vec![2, 3, 1]);
    }

    #[test]
    fn input_is_left_untouched() {
        let records = vec![park(2, "B", "Beginner", "Active"), park(1, "A", "Beginner", "Active")];
        let snapshot = records.clone();
        let _ = derive(&records, &by(SortKey::Name, SortDirection::Ascending));
        assert_eq!(records, snapshot);
    }
}
