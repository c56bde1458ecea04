use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::MatchOdds;

/// MatchOdds as it appears on the wire; the parent match is exposed as a
/// flat `matchId`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchOddsResponse {
    pub id: i64,
    pub match_id: i64,
    pub specifier: String,
    pub odd: f64,
}

impl From<MatchOdds> for MatchOddsResponse {
    fn from(odds: MatchOdds) -> Self {
        Self {
            id: odds.id,
            match_id: odds.match_id,
            specifier: odds.specifier,
            odd: odds.odd,
        }
    }
}

/// Nested match reference as supplied in odds payloads: `{"id": 5}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct MatchRef {
    pub id: i64,
}

/// Request payload for creating odds, also used as the replacement body of
/// `PUT /api/matchOdds/{id}`. The referenced match must exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchOddsRequest {
    #[serde(rename = "match")]
    pub match_ref: MatchRef,

    #[validate(length(min = 1, max = 255, message = "Specifier is required"))]
    pub specifier: String,

    pub odd: f64,
}

/// One element of a `PUT /api/matchOdds/batch` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MatchOddsUpdateItem {
    pub id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: CreateMatchOddsRequest,
}

/// Optional search filters for `GET /api/matchOdds`. `odd_over` and
/// `odd_under` are strict bounds.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OddsSearchFilter {
    pub specifier: Option<String>,
    pub odd: Option<f64>,
    pub odd_over: Option<f64>,
    pub odd_under: Option<f64>,
    pub match_id: Option<i64>,
}

/// A single recognized entry of a `PATCH /api/matchOdds/{id}` body.
///
/// `Match` carries the referenced match id as parsed from the nested
/// `{"match": {"id": N}}` shape; the caller is responsible for checking
/// that the match actually exists.
#[derive(Debug, Clone, PartialEq)]
pub enum OddsFieldUpdate {
    Specifier(String),
    Odd(f64),
    Match(i64),
}

impl OddsFieldUpdate {
    pub fn parse_map(updates: &Map<String, Value>) -> Result<Vec<Self>> {
        updates
            .iter()
            .map(|(key, value)| Self::parse_entry(key, value))
            .collect()
    }

    fn parse_entry(key: &str, value: &Value) -> Result<Self> {
        match key {
            "specifier" => value
                .as_str()
                .map(|s| Self::Specifier(s.to_owned()))
                .ok_or_else(|| {
                    StorageError::InvalidArgument("Field 'specifier' must be a string".to_string())
                }),
            "odd" => parse_odd(value),
            "match" => parse_match_ref(value),
            _ => Err(StorageError::InvalidArgument(format!(
                "Field '{key}' is not allowed to be updated"
            ))),
        }
    }
}

/// An odd is accepted as a JSON number or a string holding a decimal.
fn parse_odd(value: &Value) -> Result<OddsFieldUpdate> {
    if let Some(odd) = value.as_f64() {
        return Ok(OddsFieldUpdate::Odd(odd));
    }

    if let Some(raw) = value.as_str() {
        return raw
            .parse::<f64>()
            .map(OddsFieldUpdate::Odd)
            .map_err(|_| StorageError::InvalidArgument(format!("Invalid odd value '{raw}'")));
    }

    Err(StorageError::InvalidArgument(
        "Field 'odd' must be a number or a numeric string".to_string(),
    ))
}

fn parse_match_ref(value: &Value) -> Result<OddsFieldUpdate> {
    let object = value.as_object().ok_or_else(|| {
        StorageError::InvalidArgument("Invalid format for field 'match'".to_string())
    })?;

    object
        .get("id")
        .and_then(Value::as_i64)
        .map(OddsFieldUpdate::Match)
        .ok_or_else(|| StorageError::InvalidArgument("Invalid or missing match.id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn parses_specifier_and_odd() {
        let updates = map(json!({ "specifier": "X", "odd": 3.15 }));
        let fields = OddsFieldUpdate::parse_map(&updates).unwrap();
        assert!(fields.contains(&OddsFieldUpdate::Specifier("X".to_string())));
        assert!(fields.contains(&OddsFieldUpdate::Odd(3.15)));
    }

    #[test]
    fn accepts_odd_as_numeric_string() {
        let updates = map(json!({ "odd": "2.25" }));
        let fields = OddsFieldUpdate::parse_map(&updates).unwrap();
        assert_eq!(fields, vec![OddsFieldUpdate::Odd(2.25)]);
    }

    #[test]
    fn rejects_unparseable_odd() {
        let updates = map(json!({ "odd": "not-a-number" }));
        let err = OddsFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));

        let updates = map(json!({ "odd": true }));
        assert!(OddsFieldUpdate::parse_map(&updates).is_err());
    }

    #[test]
    fn parses_nested_match_reference() {
        let updates = map(json!({ "match": { "id": 5 } }));
        let fields = OddsFieldUpdate::parse_map(&updates).unwrap();
        assert_eq!(fields, vec![OddsFieldUpdate::Match(5)]);
    }

    #[test]
    fn rejects_non_object_match_reference() {
        let updates = map(json!({ "match": "not-an-object" }));
        let err = OddsFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_match_reference_without_id() {
        let updates = map(json!({ "match": { "name": "OSFP-PAO" } }));
        let err = OddsFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_unknown_field() {
        let updates = map(json!({ "price": 2.0 }));
        let err = OddsFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }
}
