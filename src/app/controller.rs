//! Filter and sort controller.
//!
//! Holds the list criteria and the map quick filter. Setters report whether anything
//! changed so the owner recomputes only the views that depend on it.

use crate::view::{CategoryFilter, FilterSortCriteria, QuickFilter, SortDirection, SortKey};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSortController {
    criteria: FilterSortCriteria,
    quick_filter: QuickFilter,
}

impl FilterSortController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterSortCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn quick_filter(&self) -> QuickFilter {
        self.quick_filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if self.criteria.search == search {
            return false;
        }
        tracing::debug!(search = %search, "search changed");
        self.criteria.search = search;
        true
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> bool {
        if self.criteria.category == category {
            return false;
        }
        tracing::debug!(%category, "category filter changed");
        self.criteria.category = category;
        true
    }

    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        if self.criteria.sort_key == key {
            return false;
        }
        tracing::debug!(?key, "sort key changed");
        self.criteria.sort_key = key;
        true
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        if self.criteria.direction == direction {
            return false;
        }
        tracing::debug!(?direction, "sort direction changed");
        self.criteria.direction = direction;
        true
    }

    /// Flips between ascending and descending. Always a change.
    pub fn toggle_sort_direction(&mut self) -> bool {
        self.set_sort_direction(self.criteria.direction.toggled())
    }

    pub fn set_quick_filter(&mut self, filter: QuickFilter) -> bool {
        if self.quick_filter == filter {
            return false;
        }
        tracing::debug!(?filter, "quick filter changed");
        self.quick_filter = filter;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    #[test]
    fn setters_report_changes_only() {
        let mut controller = FilterSortController::new();
        assert!(!controller.set_search(""));
        assert!(controller.set_search("fair"));
        assert!(!controller.set_search("fair"));

        assert!(controller.set_category(CategoryFilter::Only(Difficulty::Advanced)));
        assert!(!controller.set_category(CategoryFilter::Only(Difficulty::Advanced)));

        assert!(!controller.set_sort_key(SortKey::Name));
        assert!(controller.set_sort_key(SortKey::Status));
    }

    #[test]
    fn toggle_flips_direction() {
        let mut controller = FilterSortController::new();
        assert!(controller.toggle_sort_direction());
        assert_eq!(controller.criteria().direction, SortDirection::Descending);
        assert!(controller.toggle_sort_direction());
        assert_eq!(controller.criteria().direction, SortDirection::Ascending);
    }

    #[test]
    fn quick_filter_is_independent_of_list_criteria() {
        let mut controller = FilterSortController::new();
        controller.set_quick_filter(QuickFilter::Lighted);
        assert_eq!(controller.criteria(), &FilterSortCriteria::default());
    }
}
