use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Result, StorageError};
use crate::models::{Match, Sport};

/// Match as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: i64,
    pub description: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub team_a: String,
    pub team_b: String,
    pub sport: Sport,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            description: m.description,
            match_date: m.match_date,
            match_time: m.match_time,
            team_a: m.team_a,
            team_b: m.team_b,
            sport: m.sport,
        }
    }
}

/// Request payload for creating a match, also used as the replacement
/// body of `PUT /api/matches/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    #[validate(length(min = 1, max = 255, message = "Description is required"))]
    pub description: String,

    pub match_date: NaiveDate,

    pub match_time: NaiveTime,

    #[validate(length(min = 1, max = 255, message = "Team A is required"))]
    pub team_a: String,

    #[validate(length(min = 1, max = 255, message = "Team B is required"))]
    pub team_b: String,

    pub sport: Sport,
}

/// One element of a `PUT /api/matches/batch` body: the id of the row to
/// replace plus the full replacement fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MatchUpdateItem {
    pub id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: CreateMatchRequest,
}

/// Optional search filters for `GET /api/matches`. Every present filter is
/// ANDed into the query; `*_before`/`*_after` bounds are strict.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MatchSearchFilter {
    pub description: Option<String>,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub sport: Option<Sport>,
    pub match_date: Option<NaiveDate>,
    pub match_date_before: Option<NaiveDate>,
    pub match_date_after: Option<NaiveDate>,
    pub match_time: Option<NaiveTime>,
    pub match_time_before: Option<NaiveTime>,
    pub match_time_after: Option<NaiveTime>,
}

/// A single recognized entry of a `PATCH /api/matches/{id}` body, parsed
/// into its properly-typed value. Unknown keys and unparseable values are
/// rejected before anything is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchFieldUpdate {
    Description(String),
    MatchDate(NaiveDate),
    MatchTime(NaiveTime),
    TeamA(String),
    TeamB(String),
    Sport(Sport),
}

impl MatchFieldUpdate {
    pub fn parse_map(updates: &Map<String, Value>) -> Result<Vec<Self>> {
        updates
            .iter()
            .map(|(key, value)| Self::parse_entry(key, value))
            .collect()
    }

    fn parse_entry(key: &str, value: &Value) -> Result<Self> {
        match key {
            "description" => Ok(Self::Description(expect_string(key, value)?)),
            "teamA" => Ok(Self::TeamA(expect_string(key, value)?)),
            "teamB" => Ok(Self::TeamB(expect_string(key, value)?)),
            "matchDate" => {
                let raw = expect_string(key, value)?;
                raw.parse::<NaiveDate>().map(Self::MatchDate).map_err(|_| {
                    StorageError::InvalidArgument(format!(
                        "Invalid date '{raw}' for field 'matchDate'"
                    ))
                })
            }
            "matchTime" => {
                let raw = expect_string(key, value)?;
                raw.parse::<NaiveTime>().map(Self::MatchTime).map_err(|_| {
                    StorageError::InvalidArgument(format!(
                        "Invalid time '{raw}' for field 'matchTime'"
                    ))
                })
            }
            "sport" => {
                let raw = expect_string(key, value)?;
                Sport::from_name(&raw).map(Self::Sport).ok_or_else(|| {
                    StorageError::InvalidArgument(format!("Unknown sport '{raw}'"))
                })
            }
            _ => Err(StorageError::InvalidArgument(format!(
                "Field '{key}' is not allowed to be updated"
            ))),
        }
    }

    pub fn apply(&self, target: &mut Match) {
        match self {
            Self::Description(description) => target.description = description.clone(),
            Self::MatchDate(match_date) => target.match_date = *match_date,
            Self::MatchTime(match_time) => target.match_time = *match_time,
            Self::TeamA(team_a) => target.team_a = team_a.clone(),
            Self::TeamB(team_b) => target.team_b = team_b.clone(),
            Self::Sport(sport) => target.sport = *sport,
        }
    }
}

fn expect_string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| StorageError::InvalidArgument(format!("Field '{key}' must be a string")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn parses_every_allowed_field() {
        let updates = map(json!({
            "description": "AEK-PAO",
            "teamA": "AEK",
            "teamB": "PAO",
            "matchDate": "2025-08-01",
            "matchTime": "20:00:00",
            "sport": "Basketball",
        }));

        let fields = MatchFieldUpdate::parse_map(&updates).unwrap();
        assert_eq!(fields.len(), 6);
        assert!(fields.contains(&MatchFieldUpdate::Sport(Sport::Basketball)));
        assert!(fields.contains(&MatchFieldUpdate::MatchDate(
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
        )));
    }

    #[test]
    fn rejects_unknown_field() {
        let updates = map(json!({ "foo": "bar" }));
        let err = MatchFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_unknown_sport_name() {
        let updates = map(json!({ "sport": "Curling" }));
        let err = MatchFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_unparseable_date() {
        let updates = map(json!({ "matchDate": "not-a-date" }));
        assert!(MatchFieldUpdate::parse_map(&updates).is_err());
    }

    #[test]
    fn rejects_non_string_values() {
        let updates = map(json!({ "teamA": 42 }));
        let err = MatchFieldUpdate::parse_map(&updates).unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }
}
