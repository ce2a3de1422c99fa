//! Location record domain model.
//!
//! This module defines [`LocationRecord`], one skatepark as held by the record store,
//! together with its enumerated attributes ([`Status`], [`Difficulty`]), its validated
//! position ([`GeoPoint`]), and the create payload ([`NewLocationRecord`]).
//!
//! Enumerated attributes keep values outside the known set as `Unknown` so a single
//! unexpected value never fails a load; unknown values rank after every known one.

use super::error::{Result, SkatemapError};
use super::feature::FeatureRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closing label used when a park has variable hours but no explicit closing type.
pub const DEFAULT_VARIABLE_CLOSING: &str = "Dusk";

/// Rank given to status and difficulty values outside the enumerated set.
pub const UNKNOWN_RANK: u32 = 999;

/// Stable identifier assigned by the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operating status of a park.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Active,
    UnderConstruction,
    TemporarilyClosed,
    Closed,
    /// Any value outside the enumerated set, kept verbatim.
    Unknown(String),
}

impl Status {
    /// Sort rank: Active=1, UnderConstruction=2, TemporarilyClosed=3, Closed=4,
    /// anything else [`UNKNOWN_RANK`].
    #[must_use]
    pub const fn rank(&self) -> u32 {
        match self {
            Self::Active => 1,
            Self::UnderConstruction => 2,
            Self::TemporarilyClosed => 3,
            Self::Closed => 4,
            Self::Unknown(_) => UNKNOWN_RANK,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::UnderConstruction => "Under Construction",
            Self::TemporarilyClosed => "Temporarily Closed",
            Self::Closed => "Closed",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        match raw {
            "Active" => Self::Active,
            "Under Construction" | "UnderConstruction" => Self::UnderConstruction,
            "Temporarily Closed" | "TemporarilyClosed" => Self::TemporarilyClosed,
            "Closed" => Self::Closed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty opinion recorded for a park.
///
/// Matching against a category filter is exact and case-sensitive; `"beginner"` is
/// an [`Difficulty::Unknown`] value, not [`Difficulty::Beginner`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
    /// Any value outside the enumerated set, kept verbatim (empty when missing).
    Unknown(String),
}

impl Difficulty {
    /// Sort rank: Beginner=1, Intermediate=2, Advanced=3, AllLevels=4, anything
    /// else [`UNKNOWN_RANK`].
    #[must_use]
    pub const fn rank(&self) -> u32 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::AllLevels => 4,
            Self::Unknown(_) => UNKNOWN_RANK,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::AllLevels => "All-Levels",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for Difficulty {
    fn from(raw: &str) -> Self {
        match raw {
            "Beginner" => Self::Beginner,
            "Intermediate" => Self::Intermediate,
            "Advanced" => Self::Advanced,
            "All-Levels" | "AllLevels" => Self::AllLevels,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 position known to be within geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Returns `None` unless both coordinates are finite and in range.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        (is_valid_latitude(lat) && is_valid_longitude(lng)).then_some(Self { lat, lng })
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }
}

fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

fn is_valid_longitude(lng: f64) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}

/// One skatepark as fetched from the remote source.
///
/// Text attributes are optional because the source does not guarantee them; a record
/// missing a field that an active filter needs is excluded from that view rather than
/// failing the whole derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: RecordId,
    pub name: Option<String>,
    pub status: Status,
    /// `None` when the source supplied no coordinates; such records get no marker.
    pub position: Option<GeoPoint>,
    pub address: Option<String>,
    pub difficulty: Difficulty,
    pub has_lighting: bool,
    pub description: Option<String>,
    pub opens_at: Option<String>,
    /// Time of day or a symbolic value such as "Dusk".
    pub closes_at: Option<String>,
    pub last_updated: Option<NaiveDate>,
    pub website: Option<String>,
    pub has_variable_hours: bool,
    pub variable_closing: Option<String>,
    #[serde(default)]
    pub features: Vec<FeatureRef>,
}

impl LocationRecord {
    /// Creates a record with the given identifier and name and every other attribute
    /// empty or unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use skatemap::domain::{Difficulty, LocationRecord, RecordId};
    ///
    /// let park = LocationRecord::new(RecordId(1), "Fairmont");
    /// assert_eq!(park.display_name(), "Fairmont");
    /// assert!(!park.difficulty.is_known());
    /// ```
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            status: Status::Unknown(String::new()),
            position: None,
            address: None,
            difficulty: Difficulty::Unknown(String::new()),
            has_lighting: false,
            description: None,
            opens_at: None,
            closes_at: None,
            last_updated: None,
            website: None,
            has_variable_hours: false,
            variable_closing: None,
            features: Vec::new(),
        }
    }

    /// Name for display, falling back to a placeholder when the source omitted it.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed park")
    }

    /// Human-readable opening hours.
    ///
    /// Parks with variable hours close at their variable closing type (default
    /// [`DEFAULT_VARIABLE_CLOSING`]) rather than a fixed time. Missing parts render
    /// as `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skatemap::domain::{LocationRecord, RecordId};
    ///
    /// let mut park = LocationRecord::new(RecordId(1), "Fairmont");
    /// park.opens_at = Some("08:00".to_string());
    /// park.closes_at = Some("22:00".to_string());
    /// assert_eq!(park.hours_display(), "08:00 - 22:00");
    ///
    /// park.has_variable_hours = true;
    /// assert_eq!(park.hours_display(), "08:00 - Dusk");
    /// ```
    #[must_use]
    pub fn hours_display(&self) -> String {
        let opens = self.opens_at.as_deref().unwrap_or("?");
        let closes = if self.has_variable_hours {
            self.variable_closing.as_deref().unwrap_or(DEFAULT_VARIABLE_CLOSING)
        } else {
            self.closes_at.as_deref().unwrap_or("?")
        };
        format!("{opens} - {closes}")
    }

    /// First `max_chars` characters of the description, with `...` appended when
    /// the description was longer.
    #[must_use]
    pub fn description_excerpt(&self, max_chars: usize) -> String {
        let description = self.description.as_deref().unwrap_or_default();
        match description.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &description[..cut]),
            None => description.to_string(),
        }
    }

    /// Turn-by-turn directions link for the park's position.
    #[must_use]
    pub fn directions_url(&self) -> Option<String> {
        self.position.map(|p| {
            format!(
                "https://www.google.com/maps/dir/?api=1&destination={},{}",
                p.lat(),
                p.lng()
            )
        })
    }
}

/// Payload for creating a new park.
///
/// The remote source assigns the identifier and the last-updated date. Defaults match
/// the entry form: an active, intermediate park open from 08:00 until dusk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocationRecord {
    pub name: String,
    pub status: Status,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub difficulty: Difficulty,
    pub has_lighting: bool,
    pub description: String,
    pub opens_at: String,
    pub closes_at: String,
    pub website: Option<String>,
    pub has_variable_hours: bool,
    #[serde(default)]
    pub feature_ids: Vec<i64>,
}

impl Default for NewLocationRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: Status::Active,
            latitude: f64::NAN,
            longitude: f64::NAN,
            address: String::new(),
            difficulty: Difficulty::Intermediate,
            has_lighting: false,
            description: String::new(),
            opens_at: "08:00".to_string(),
            closes_at: DEFAULT_VARIABLE_CLOSING.to_string(),
            website: None,
            has_variable_hours: true,
            feature_ids: Vec::new(),
        }
    }
}

impl NewLocationRecord {
    /// Checks the draft locally before it is submitted.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Validation`] when a required text field is blank, a
    /// coordinate is not finite or out of range, or the status or difficulty is not
    /// one of the enumerated values.
    ///
    /// # Examples
    ///
    /// ```
    /// use skatemap::domain::NewLocationRecord;
    ///
    /// let draft = NewLocationRecord {
    ///     name: "Jordan Park".to_string(),
    ///     latitude: 40.7408,
    ///     longitude: 191.0,
    ///     address: "1060 S 900 W".to_string(),
    ///     description: "Small ramps and rails".to_string(),
    ///     ..Default::default()
    /// };
    /// assert!(draft.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("address", &self.address),
            ("description", &self.description),
            ("opening time", &self.opens_at),
            ("closing time", &self.closes_at),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(SkatemapError::Validation(format!("Park {field} is required")));
        }

        if !is_valid_latitude(self.latitude) || !is_valid_longitude(self.longitude) {
            return Err(SkatemapError::Validation(
                "Invalid coordinates. Latitude must be between -90 and 90, Longitude between -180 and 180."
                    .to_string(),
            ));
        }

        if !self.status.is_known() {
            return Err(SkatemapError::Validation(format!(
                "Unknown park status: {}",
                self.status
            )));
        }
        if !self.difficulty.is_known() {
            return Err(SkatemapError::Validation(format!(
                "Unknown difficulty: {}",
                self.difficulty
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> NewLocationRecord {
        NewLocationRecord {
            name: "Fairmont Skatepark".to_string(),
            latitude: 40.7365,
            longitude: -111.8762,
            address: "1040 E Sugarmont Dr".to_string(),
            description: "Bowl-style park with multiple lines".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn unknown_enumerations_rank_last_and_keep_their_text() {
        let expert = Difficulty::from("Expert");
        assert_eq!(expert.rank(), UNKNOWN_RANK);
        assert_eq!(expert.as_str(), "Expert");
        assert!(Difficulty::AllLevels.rank() < expert.rank());
        assert_eq!(Status::from("Under Construction"), Status::UnderConstruction);
        assert_eq!(Status::from("closed"), Status::Unknown("closed".to_string()));
    }

    #[test]
    fn geo_point_rejects_out_of_range_and_non_finite() {
        assert!(GeoPoint::new(40.76, -111.89).is_some());
        assert!(GeoPoint::new(90.0, 180.0).is_some());
        assert!(GeoPoint::new(90.5, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -180.1).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn excerpt_truncates_on_character_boundaries() {
        let mut park = LocationRecord::new(RecordId(7), "Café Bowl");
        park.description = Some("ñ".repeat(120));
        let excerpt = park.description_excerpt(100);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 103);

        park.description = Some("short".to_string());
        assert_eq!(park.description_excerpt(100), "short");
    }

    #[test]
    fn variable_hours_prefer_the_closing_type() {
        let mut park = LocationRecord::new(RecordId(1), "Fairmont");
        park.opens_at = Some("06:00".to_string());
        park.has_variable_hours = true;
        park.variable_closing = Some("Sunset".to_string());
        assert_eq!(park.hours_display(), "06:00 - Sunset");
    }

    #[test]
    fn validation_accepts_a_complete_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn validation_rejects_blank_fields_and_bad_coordinates() {
        let blank_name = NewLocationRecord { name: "  ".to_string(), ..valid_draft() };
        assert!(matches!(blank_name.validate(), Err(SkatemapError::Validation(m)) if m.contains("name")));

        let bad_lat = NewLocationRecord { latitude: -91.0, ..valid_draft() };
        assert!(bad_lat.validate().is_err());

        let unset = NewLocationRecord { longitude: f64::NAN, ..valid_draft() };
        assert!(unset.validate().is_err());

        let odd_difficulty = NewLocationRecord {
            difficulty: Difficulty::from("Expert"),
            ..valid_draft()
        };
        assert!(odd_difficulty.validate().is_err());
    }

    #[test]
    fn difficulty_accepts_the_spellings_the_form_offers() {
        for raw in ["Beginner", "Intermediate", "Advanced", "All-Levels"] {
            assert!(Difficulty::from(raw).is_known(), "{raw} should be recognized");
        }
        let draft = NewLocationRecord {
            difficulty: Difficulty::from("All-Levels"),
            ..valid_draft()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn record_with_last_updated_date_serializes() {
        let mut park = LocationRecord::new(RecordId(7), "Sugar House");
        park.last_updated = NaiveDate::from_ymd_opt(2024, 5, 17);

        let json = serde_json::to_value(&park).expect("serializes");
        assert_eq!(json["last_updated"], "2024-05-17");
        let back: LocationRecord = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, park);
    }
}
