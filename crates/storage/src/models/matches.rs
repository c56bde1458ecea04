use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Sport;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Match {
    pub id: i64,
    pub description: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub team_a: String,
    pub team_b: String,
    pub sport: Sport,
}

/// Two matches describing the same fixture are equal regardless of which
/// row they were stored under.
impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.match_date == other.match_date
            && self.match_time == other.match_time
            && self.team_a == other.team_a
            && self.team_b == other.team_b
            && self.sport == other.sport
    }
}

impl Eq for Match {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(id: i64) -> Match {
        Match {
            id,
            description: "OSFP-PAO".to_string(),
            match_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            match_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            team_a: "OSFP".to_string(),
            team_b: "PAO".to_string(),
            sport: Sport::Football,
        }
    }

    #[test]
    fn equality_ignores_id() {
        assert_eq!(fixture(1), fixture(2));
    }

    #[test]
    fn equality_compares_all_other_fields() {
        let mut other = fixture(1);
        other.sport = Sport::Basketball;
        assert_ne!(fixture(1), other);

        let mut other = fixture(1);
        other.team_b = "ARIS".to_string();
        assert_ne!(fixture(1), other);
    }
}
