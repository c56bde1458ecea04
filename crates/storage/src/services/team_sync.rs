//! Keeps a match description and its team fields consistent.
//!
//! The description of a match is always `"{teamA}-{teamB}"`. Full-replace
//! writes regenerate the description from the teams whenever the two
//! disagree. Partial updates propagate whichever side actually changed:
//! a team edit rewrites the description, a description edit is split back
//! into the two team fields.

use crate::dto::matches::MatchFieldUpdate;
use crate::error::{Result, StorageError};
use crate::models::Match;

pub fn generate_description(team_a: &str, team_b: &str) -> String {
    format!("{team_a}-{team_b}")
}

/// Full-replace policy: teams win over a disagreeing description.
pub fn normalize(m: &mut Match) {
    let expected = generate_description(&m.team_a, &m.team_b);
    if m.description != expected {
        m.description = expected;
    }
}

/// Partial-update policy: propagate from the side that changed relative to
/// `original`. A team change wins over a simultaneously supplied
/// description; a lone description change must split into exactly two
/// dash-separated parts.
pub fn reconcile(original: &Match, updated: &mut Match) -> Result<()> {
    let teams_changed =
        original.team_a != updated.team_a || original.team_b != updated.team_b;

    if teams_changed {
        updated.description = generate_description(&updated.team_a, &updated.team_b);
        return Ok(());
    }

    if original.description != updated.description {
        let parts: Vec<&str> = updated.description.split('-').collect();
        if parts.len() != 2 {
            return Err(StorageError::InvalidArgument(
                "Invalid description format, expected 'teamA-teamB'".to_string(),
            ));
        }
        updated.team_a = parts[0].to_string();
        updated.team_b = parts[1].to_string();
    }

    Ok(())
}

/// Apply a parsed set of partial updates to a snapshot of the current
/// record and reconcile the result.
pub fn apply_updates(current: &Match, updates: &[MatchFieldUpdate]) -> Result<Match> {
    let mut updated = current.clone();
    for update in updates {
        update.apply(&mut updated);
    }
    reconcile(current, &mut updated)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::{Map, Value, json};

    use crate::models::Sport;

    fn base_match() -> Match {
        Match {
            id: 1,
            description: "OSFP-PAO".to_string(),
            match_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            match_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            team_a: "OSFP".to_string(),
            team_b: "PAO".to_string(),
            sport: Sport::Football,
        }
    }

    fn updates(value: Value) -> Vec<MatchFieldUpdate> {
        let map: Map<String, Value> = value.as_object().unwrap().clone();
        MatchFieldUpdate::parse_map(&map).unwrap()
    }

    #[test]
    fn normalize_regenerates_description_from_teams() {
        let mut m = base_match();
        m.description = "stale".to_string();
        normalize(&mut m);
        assert_eq!(m.description, "OSFP-PAO");
    }

    #[test]
    fn normalize_keeps_consistent_description() {
        let mut m = base_match();
        normalize(&mut m);
        assert_eq!(m.description, "OSFP-PAO");
    }

    #[test]
    fn team_change_regenerates_description() {
        let current = base_match();
        let updated = apply_updates(&current, &updates(json!({ "teamA": "AEK" }))).unwrap();

        assert_eq!(updated.team_a, "AEK");
        assert_eq!(updated.team_b, "PAO");
        assert_eq!(updated.description, "AEK-PAO");
    }

    #[test]
    fn description_change_splits_into_teams() {
        let current = base_match();
        let updated =
            apply_updates(&current, &updates(json!({ "description": "AEK-ARIS" }))).unwrap();

        assert_eq!(updated.team_a, "AEK");
        assert_eq!(updated.team_b, "ARIS");
        assert_eq!(updated.description, "AEK-ARIS");
    }

    #[test]
    fn team_change_wins_over_supplied_description() {
        let current = base_match();
        let updated = apply_updates(
            &current,
            &updates(json!({ "teamB": "ARIS", "description": "IGNORED-VALUE" })),
        )
        .unwrap();

        assert_eq!(updated.team_a, "OSFP");
        assert_eq!(updated.team_b, "ARIS");
        assert_eq!(updated.description, "OSFP-ARIS");
    }

    #[test]
    fn dashless_description_is_rejected() {
        let current = base_match();
        let err = apply_updates(
            &current,
            &updates(json!({ "description": "INVALID_DESCRIPTION" })),
        )
        .unwrap_err();

        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn multi_dash_description_is_rejected() {
        let current = base_match();
        let err = apply_updates(&current, &updates(json!({ "description": "A-B-C" })))
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn untouched_fields_pass_through_unchanged() {
        let current = base_match();
        let updated = apply_updates(
            &current,
            &updates(json!({ "matchDate": "2025-09-15", "sport": "Basketball" })),
        )
        .unwrap();

        assert_eq!(
            updated.match_date,
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
        );
        assert_eq!(updated.sport, Sport::Basketball);
        assert_eq!(updated.description, "OSFP-PAO");
        assert_eq!(updated.team_a, "OSFP");
        assert_eq!(updated.team_b, "PAO");
    }

    #[test]
    fn invariant_holds_after_every_successful_update() {
        let current = base_match();
        for payload in [
            json!({ "teamA": "AEK" }),
            json!({ "teamB": "ARIS" }),
            json!({ "description": "AEK-ARIS" }),
            json!({ "teamA": "A", "teamB": "B" }),
        ] {
            let updated = apply_updates(&current, &updates(payload)).unwrap();
            assert_eq!(
                updated.description,
                generate_description(&updated.team_a, &updated.team_b)
            );
        }
    }
}
