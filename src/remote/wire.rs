//! Wire format of the remote park source.
//!
//! The server speaks PascalCase JSON rows (`ParkName`, `LocationLatitude`, ...) and
//! wraps collections in a `recordset` envelope. Decoding is lenient per row: a row that
//! cannot be turned into a [`LocationRecord`] is dropped with a warning and the rest of
//! the collection still loads.

use crate::domain::{
    Difficulty, FeatureRef, GeoPoint, LocationRecord, NewLocationRecord, RecordId, Result,
    SkatemapError, Status,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A scalar the server may send as a bool, a number, or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Loose {
    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireFeature {
    #[serde(rename = "Id", alias = "id")]
    id: Option<Loose>,
    #[serde(rename = "FeatureName", alias = "featureName", alias = "name")]
    name: Option<String>,
    #[serde(rename = "FeatureType", alias = "featureType")]
    feature_type: Option<String>,
    #[serde(rename = "FeatureCategory", alias = "featureCategory", alias = "category")]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(rename = "Id", alias = "id")]
    id: Option<Loose>,
    #[serde(rename = "ParkName", alias = "parkName")]
    name: Option<String>,
    #[serde(rename = "ParkStatus", alias = "parkStatus")]
    status: Option<String>,
    #[serde(rename = "LocationLatitude", alias = "locationLatitude")]
    latitude: Option<Loose>,
    #[serde(rename = "LocationLongitude", alias = "locationLongitude")]
    longitude: Option<Loose>,
    #[serde(rename = "ParkAddress", alias = "parkAddress")]
    address: Option<String>,
    #[serde(rename = "DifficultyOpinion", alias = "difficultyOpinion")]
    difficulty: Option<String>,
    #[serde(rename = "HasLighting", alias = "hasLighting")]
    has_lighting: Option<Loose>,
    #[serde(rename = "ParkDescription", alias = "parkDescription")]
    description: Option<String>,
    #[serde(rename = "Opens", alias = "opens")]
    opens: Option<String>,
    #[serde(rename = "Closes", alias = "closes")]
    closes: Option<String>,
    #[serde(rename = "LastUpdatedDate", alias = "lastUpdatedDate")]
    last_updated: Option<String>,
    #[serde(rename = "ParkWebsite", alias = "parkWebsite")]
    website: Option<String>,
    #[serde(rename = "HasVariableHours", alias = "hasVariableHours")]
    has_variable_hours: Option<Loose>,
    #[serde(rename = "VariableClosingType", alias = "variableClosingType")]
    variable_closing: Option<String>,
    #[serde(rename = "features", alias = "Features")]
    features: Option<Vec<WireFeature>>,
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowRejection {
    MissingId,
    CoordinatesOutOfRange,
}

impl WireRecord {
    fn into_record(self) -> std::result::Result<LocationRecord, RowRejection> {
        let id = self
            .id
            .as_ref()
            .and_then(Loose::as_i64)
            .ok_or(RowRejection::MissingId)?;

        let latitude = self.latitude.as_ref().and_then(Loose::as_f64);
        let longitude = self.longitude.as_ref().and_then(Loose::as_f64);
        let position = match (latitude, longitude) {
            (Some(lat), Some(lng)) => {
                Some(GeoPoint::new(lat, lng).ok_or(RowRejection::CoordinatesOutOfRange)?)
            }
            _ => None,
        };

        let features = self
            .features
            .unwrap_or_default()
            .into_iter()
            .filter_map(|feature| {
                let name = non_blank(feature.name)?;
                Some(FeatureRef {
                    id: feature.id.as_ref().and_then(Loose::as_i64),
                    name,
                    feature_type: non_blank(feature.feature_type),
                    category: non_blank(feature.category),
                })
            })
            .collect();

        Ok(LocationRecord {
            id: RecordId(id),
            name: non_blank(self.name),
            status: self.status.map_or_else(|| Status::Unknown(String::new()), Status::from),
            position,
            address: non_blank(self.address),
            difficulty: self
                .difficulty
                .map_or_else(|| Difficulty::Unknown(String::new()), Difficulty::from),
            has_lighting: self.has_lighting.as_ref().is_some_and(Loose::as_bool),
            description: non_blank(self.description),
            opens_at: non_blank(self.opens).map(|t| normalize_time(&t)),
            closes_at: non_blank(self.closes).map(|t| normalize_time(&t)),
            last_updated: self.last_updated.as_deref().and_then(parse_date),
            website: non_blank(self.website),
            has_variable_hours: self.has_variable_hours.as_ref().is_some_and(Loose::as_bool),
            variable_closing: non_blank(self.variable_closing),
            features,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Reduces SQL `TIME` values serialized as timestamps (`1970-01-01T08:00:00.000Z`) or
/// `HH:MM:SS` to `HH:MM`. Symbolic values such as `Dusk` pass through.
fn normalize_time(raw: &str) -> String {
    let time = raw.split_once('T').map_or(raw, |(_, t)| t);
    let bytes = time.as_bytes();
    let looks_like_clock = bytes.len() >= 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..5].iter().all(u8::is_ascii_digit);
    if looks_like_clock {
        time[..5].to_string()
    } else {
        raw.trim().to_string()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_body(body: &str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|e| SkatemapError::InvalidResponse(format!("response body is not JSON: {e}")))
}

fn decode_row(index: usize, row: Value) -> Option<LocationRecord> {
    let wire: WireRecord = match serde_json::from_value(row) {
        Ok(wire) => wire,
        Err(e) => {
            tracing::warn!(index, error = %e, "dropping undecodable park row");
            return None;
        }
    };
    match wire.into_record() {
        Ok(record) => Some(record),
        Err(reason) => {
            tracing::warn!(index, ?reason, "dropping malformed park row");
            None
        }
    }
}

/// Decodes a collection response into records.
///
/// Accepts a bare array or an object with a `recordset` array. Malformed rows and
/// repeated identifiers are dropped with a warning.
///
/// # Errors
///
/// Returns [`SkatemapError::InvalidResponse`] if the body is not JSON or has neither
/// accepted shape.
pub fn decode_collection(body: &str) -> Result<Vec<LocationRecord>> {
    let rows = match parse_body(body)? {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("recordset") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(SkatemapError::InvalidResponse(
                    "expected an array of parks or a recordset".to_string(),
                ))
            }
        },
        other => {
            return Err(SkatemapError::InvalidResponse(format!(
                "expected an array of parks, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = rows.len();
    let mut seen = HashSet::with_capacity(total);
    let records: Vec<LocationRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| decode_row(index, row))
        .filter(|record| {
            let fresh = seen.insert(record.id);
            if !fresh {
                tracing::warn!(id = %record.id, "dropping duplicate park row");
            }
            fresh
        })
        .collect();

    tracing::debug!(total, decoded = records.len(), "decoded park collection");
    Ok(records)
}

/// Decodes the response to a create request.
///
/// The server may answer with the record itself, a one-row array, or a one-row
/// `recordset`.
///
/// # Errors
///
/// Returns [`SkatemapError::InvalidResponse`] if no record can be decoded.
pub fn decode_created(body: &str) -> Result<LocationRecord> {
    let row = match parse_body(body)? {
        Value::Object(mut map) => match map.remove("recordset") {
            Some(Value::Array(rows)) => rows.into_iter().next(),
            Some(_) => None,
            None => Some(Value::Object(map)),
        },
        Value::Array(rows) => rows.into_iter().next(),
        _ => None,
    };

    row.and_then(|row| decode_row(0, row)).ok_or_else(|| {
        SkatemapError::InvalidResponse("response did not contain the created park".to_string())
    })
}

/// Extracts the `message` field of an error body, if any.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Request body for creating a park.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireDraft<'a> {
    park_name: &'a str,
    park_status: &'a str,
    location_latitude: f64,
    location_longitude: f64,
    park_address: &'a str,
    difficulty_opinion: &'a str,
    has_lighting: bool,
    park_description: &'a str,
    opens: &'a str,
    closes: &'a str,
    last_updated_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    park_website: Option<&'a str>,
    has_variable_hours: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    variable_closing_type: Option<&'a str>,
    selected_features: &'a [i64],
}

impl<'a> WireDraft<'a> {
    /// Builds the body for `draft`, stamped with `today` as the last-updated date.
    #[must_use]
    pub fn new(draft: &'a NewLocationRecord, today: NaiveDate) -> Self {
        Self {
            park_name: draft.name.trim(),
            park_status: draft.status.as_str(),
            location_latitude: draft.latitude,
            location_longitude: draft.longitude,
            park_address: draft.address.trim(),
            difficulty_opinion: draft.difficulty.as_str(),
            has_lighting: draft.has_lighting,
            park_description: draft.description.trim(),
            opens: &draft.opens_at,
            closes: &draft.closes_at,
            last_updated_date: today.format("%Y-%m-%d").to_string(),
            park_website: draft.website.as_deref().filter(|w| !w.trim().is_empty()),
            has_variable_hours: draft.has_variable_hours,
            variable_closing_type: draft.has_variable_hours.then_some(draft.closes_at.as_str()),
            selected_features: &draft.feature_ids,
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDSET: &str = r#"{
        "recordsets": [],
        "recordset": [
            {
                "Id": 1,
                "ParkName": "Fairmont Skatepark",
                "ParkStatus": "Active",
                "LocationLatitude": "40.7365",
                "LocationLongitude": -111.8762,
                "ParkAddress": "1040 E Sugarmont Dr",
                "DifficultyOpinion": "Intermediate",
                "HasLighting": 1,
                "ParkDescription": "Bowl-style park",
                "Opens": "1970-01-01T08:00:00.000Z",
                "Closes": "1970-01-01T22:00:00.000Z",
                "LastUpdatedDate": "2024-03-01T00:00:00.000Z",
                "ParkWebsite": null,
                "HasVariableHours": false,
                "features": [
                    {"Id": 7, "FeatureName": "Bowl", "FeatureType": "Transition", "FeatureCategory": "Bowls"}
                ]
            },
            {"ParkName": "No id"},
            {"Id": 3, "ParkName": "Bad coords", "LocationLatitude": 123.0, "LocationLongitude": 0},
            {"Id": 4, "ParkName": 42},
            {"Id": 5, "parkName": "Camel Case", "difficultyOpinion": "All-Levels"},
            {"Id": 1, "ParkName": "Duplicate"}
        ],
        "rowsAffected": [6]
    }"#;

    #[test]
    fn decodes_recordset_and_drops_malformed_rows() {
        let records = decode_collection(RECORDSET).expect("decodes");
        let ids: Vec<i64> = records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 5]);

        let fairmont = &records[0];
        assert_eq!(fairmont.name.as_deref(), Some("Fairmont Skatepark"));
        assert_eq!(fairmont.status, Status::Active);
        assert!(fairmont.has_lighting);
        assert_eq!(fairmont.opens_at.as_deref(), Some("08:00"));
        assert_eq!(fairmont.closes_at.as_deref(), Some("22:00"));
        assert_eq!(fairmont.last_updated, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(fairmont.website, None);
        let position = fairmont.position.expect("has coordinates");
        assert!((position.lat() - 40.7365).abs() < 1e-9);
        assert_eq!(fairmont.features[0].category.as_deref(), Some("Bowls"));

        assert_eq!(records[1].difficulty, Difficulty::AllLevels);
        assert!(records[1].position.is_none());
    }

    #[test]
    fn bare_array_is_accepted() {
        let records = decode_collection(r#"[{"Id": "9", "ParkName": "String id"}]"#).expect("decodes");
        assert_eq!(records[0].id, RecordId(9));
    }

    #[test]
    fn wrong_shape_is_invalid_response() {
        let err = decode_collection(r#"{"message": "nope"}"#).expect_err("rejected");
        assert!(matches!(err, SkatemapError::InvalidResponse(_)));

        let err = decode_collection("<html>").expect_err("rejected");
        assert!(matches!(err, SkatemapError::InvalidResponse(_)));
    }

    #[test]
    fn created_record_shapes() {
        let plain = decode_created(r#"{"Id": 12, "ParkName": "New Park"}"#).expect("decodes");
        assert_eq!(plain.id, RecordId(12));

        let wrapped = decode_created(r#"{"recordset": [{"Id": 13, "ParkName": "Wrapped"}]}"#)
            .expect("decodes");
        assert_eq!(wrapped.name.as_deref(), Some("Wrapped"));

        let empty = decode_created(r#"{"recordset": [], "rowsAffected": [1]}"#);
        assert!(matches!(empty, Err(SkatemapError::InvalidResponse(_))));
    }

    #[test]
    fn error_message_is_extracted() {
        assert_eq!(
            error_message(r#"{"message": "Error fetching skateparks", "error": "timeout"}"#).as_deref(),
            Some("Error fetching skateparks")
        );
        assert_eq!(error_message("Bad request"), None);
    }

    #[test]
    fn draft_serializes_with_server_field_names() {
        let draft = NewLocationRecord {
            name: " Jordan Park ".to_string(),
            latitude: 40.7408,
            longitude: -111.9214,
            address: "1060 S 900 W".to_string(),
            description: "Small ramps".to_string(),
            feature_ids: vec![3, 4],
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let body = serde_json::to_value(WireDraft::new(&draft, today)).expect("serializes");

        assert_eq!(body["ParkName"], "Jordan Park");
        assert_eq!(body["ParkStatus"], "Active");
        assert_eq!(body["DifficultyOpinion"], "Intermediate");
        assert_eq!(body["Opens"], "08:00");
        assert_eq!(body["VariableClosingType"], "Dusk");
        assert_eq!(body["LastUpdatedDate"], "2024-06-01");
        assert_eq!(body["SelectedFeatures"], serde_json::json!([3, 4]));
        assert!(body.get("ParkWebsite").is_none());
    }

    #[test]
    fn time_normalization() {
        assert_eq!(normalize_time("08:30:00"), "08:30");
        assert_eq!(normalize_time("Dusk"), "Dusk");
        assert_eq!(normalize_time("1970-01-01T21:15:00Z"), "21:15");
    }
}
