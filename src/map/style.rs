//! Marker icon styles keyed by difficulty.

use crate::domain::Difficulty;

/// Icon style for a park marker.
///
/// Selection from a difficulty is total: anything other than beginner, intermediate,
/// or advanced (including unrecognized values) uses [`MarkerStyle::AllLevels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl MarkerStyle {
    /// Every style, in legend order.
    pub const ALL: [Self; 4] = [Self::Beginner, Self::Intermediate, Self::Advanced, Self::AllLevels];

    #[must_use]
    pub const fn for_difficulty(difficulty: &Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self::Beginner,
            Difficulty::Intermediate => Self::Intermediate,
            Difficulty::Advanced => Self::Advanced,
            Difficulty::AllLevels | Difficulty::Unknown(_) => Self::AllLevels,
        }
    }

    #[must_use]
    pub const fn icon_url(self) -> &'static str {
        match self {
            Self::Beginner => "http://maps.google.com/mapfiles/ms/icons/green-dot.png",
            Self::Intermediate => "http://maps.google.com/mapfiles/ms/icons/blue-dot.png",
            Self::Advanced => "http://maps.google.com/mapfiles/ms/icons/red-dot.png",
            Self::AllLevels => "http://maps.google.com/mapfiles/ms/icons/purple-dot.png",
        }
    }

    /// Legend text for the style.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner Friendly",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::AllLevels => "All Levels",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn unrecognized_difficulties_fall_back_to_all_levels() {
        assert_eq!(MarkerStyle::for_difficulty(&Difficulty::from("Expert")), MarkerStyle::AllLevels);
        assert_eq!(MarkerStyle::for_difficulty(&Difficulty::from("")), MarkerStyle::AllLevels);
        assert_eq!(MarkerStyle::for_difficulty(&Difficulty::AllLevels), MarkerStyle::AllLevels);
        assert_eq!(MarkerStyle::for_difficulty(&Difficulty::Advanced), MarkerStyle::Advanced);
    }

    #[test]
    fn each_style_has_a_distinct_icon() {
        let icons: HashSet<&str> = MarkerStyle::ALL.iter().map(|s| s.icon_url()).collect();
        assert_eq!(icons.len(), MarkerStyle::ALL.len());
    }
}
