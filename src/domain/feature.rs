//! Feature descriptors attached to a park (bowls, rails, lighting, ...).

use serde::{Deserialize, Serialize};

/// Bucket used for features without a category.
pub const OTHER_CATEGORY: &str = "Other";

/// A tagged amenity or obstacle descriptor owned by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub id: Option<i64>,
    pub name: String,
    pub feature_type: Option<String>,
    pub category: Option<String>,
}

impl FeatureRef {
    /// Category name, or [`OTHER_CATEGORY`] when missing or blank.
    #[must_use]
    pub fn category_or_other(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// `"name (type)"`, or just the name when the type is missing.
    #[must_use]
    pub fn label(&self) -> String {
        match self.feature_type.as_deref() {
            Some(kind) if !kind.is_empty() => format!("{} ({kind})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Groups features by category, keeping categories in first-appearance order and
/// features in their original order within each category.
///
/// # Examples
///
/// ```
/// use skatemap::domain::{group_by_category, FeatureRef};
///
/// let features = vec![
///     FeatureRef { id: Some(1), name: "Bowl".into(), feature_type: None, category: Some("Transition".into()) },
///     FeatureRef { id: Some(2), name: "Bench".into(), feature_type: None, category: None },
/// ];
/// let groups = group_by_category(&features);
/// assert_eq!(groups[0].0, "Transition");
/// assert_eq!(groups[1].0, "Other");
/// ```
#[must_use]
pub fn group_by_category(features: &[FeatureRef]) -> Vec<(String, Vec<FeatureRef>)> {
    let mut groups: Vec<(String, Vec<FeatureRef>)> = Vec::new();
    for feature in features {
        let category = feature.category_or_other();
        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, members)) => members.push(feature.clone()),
            None => groups.push((category.to_string(), vec![feature.clone()])),
        }
    }
    groups
}
