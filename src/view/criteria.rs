//! Filter and sort criteria for the list view and the map's quick filter.
//!
//! The list view and the map are independent facets: the list is driven by
//! [`FilterSortCriteria`] (search text, difficulty category, sort key and direction)
//! while map marker visibility is driven by a single [`QuickFilter`].

use crate::domain::{Difficulty, LocationRecord};
use std::fmt;
use std::str::FromStr;

/// Field the list view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Difficulty,
    Status,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "difficulty" => Ok(Self::Difficulty),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown sort key '{other}' (expected name, difficulty, or status)")),
        }
    }
}

/// Ascending applies the comparator as-is; descending inverts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction '{other}' (expected asc or desc)")),
        }
    }
}

/// Difficulty category filter for the list view.
///
/// `Only` matches exact, known difficulties; a filter holding an unknown value
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, difficulty: &Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.is_known() && wanted == difficulty,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `"all"` is the sentinel for no filtering; anything else is matched verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            Self::All
        } else {
            Self::Only(Difficulty::from(s))
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(difficulty) => f.write_str(difficulty.as_str()),
        }
    }
}

/// Transient list-view criteria, owned by the filter/sort controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSortCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

/// Coarse map-side visibility facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickFilter {
    #[default]
    All,
    Beginner,
    Intermediate,
    Advanced,
    /// Parks with night lighting.
    Lighted,
}

impl QuickFilter {
    /// Whether a marker for `record` is visible under this filter.
    #[must_use]
    pub fn matches(self, record: &LocationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Beginner => record.difficulty == Difficulty::Beginner,
            Self::Intermediate => record.difficulty == Difficulty::Intermediate,
            Self::Advanced => record.difficulty == Difficulty::Advanced,
            Self::Lighted => record.has_lighting,
        }
    }

    /// Button label shown in the map's filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Parks",
            Self::Beginner => "Beginner Friendly",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Lighted => "Night Lighting",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "lighted" => Ok(Self::Lighted),
            other => Err(format!(
                "unknown quick filter '{other}' (expected all, beginner, intermediate, advanced, or lighted)"
            )),
        }
    }
}
