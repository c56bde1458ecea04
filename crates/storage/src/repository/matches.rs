use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::matches::{CreateMatchRequest, MatchSearchFilter};
use crate::error::{Result, StorageError};
use crate::models::Match;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, description, match_date, match_time, team_a, team_b, sport";

pub struct MatchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all matches in storage-native order.
    pub async fn list(&self) -> Result<Vec<Match>> {
        let query = format!("SELECT {COLUMNS} FROM matches");
        let matches = sqlx::query_as::<_, Match>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(matches)
    }

    /// List the matches with the given ids; ids without a row are omitted.
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<Match>> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE id = ANY($1)");
        let matches = sqlx::query_as::<_, Match>(&query)
            .bind(ids.to_vec())
            .fetch_all(self.pool)
            .await?;

        Ok(matches)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Match> {
        let query = format!("SELECT {COLUMNS} FROM matches WHERE id = $1");
        let found = sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(found)
    }

    /// Conjunctive filtered search; absent filters are skipped entirely.
    pub async fn search(&self, filter: &MatchSearchFilter) -> Result<Vec<Match>> {
        let mut query = QueryBuilder::new(format!("SELECT {COLUMNS} FROM matches WHERE 1=1"));
        push_search_filters(&mut query, filter);

        let matches = query.build_query_as().fetch_all(self.pool).await?;

        Ok(matches)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM matches")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn insert(&self, req: &CreateMatchRequest) -> Result<Match> {
        let query = format!(
            "INSERT INTO matches (description, match_date, match_time, team_a, team_b, sport)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let saved = sqlx::query_as::<_, Match>(&query)
            .bind(&req.description)
            .bind(req.match_date)
            .bind(req.match_time)
            .bind(&req.team_a)
            .bind(&req.team_b)
            .bind(req.sport)
            .fetch_one(self.pool)
            .await?;

        Ok(saved)
    }

    pub async fn insert_many(&self, reqs: &[CreateMatchRequest]) -> Result<Vec<Match>> {
        let mut saved = Vec::with_capacity(reqs.len());
        for req in reqs {
            saved.push(self.insert(req).await?);
        }

        Ok(saved)
    }

    /// Replace every mutable column of the row with `id`.
    pub async fn update(&self, id: i64, m: &Match) -> Result<Match> {
        let query = format!(
            "UPDATE matches
             SET description = $2,
                 match_date = $3,
                 match_time = $4,
                 team_a = $5,
                 team_b = $6,
                 sport = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Match>(&query)
            .bind(id)
            .bind(&m.description)
            .bind(m.match_date)
            .bind(m.match_time)
            .bind(&m.team_a)
            .bind(&m.team_b)
            .bind(m.sport)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    /// Delete one match; a missing row is a `NotFound`, not a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let error = StorageError::from(e);
                if error.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(
                        "Match is still referenced by match odds".to_string(),
                    );
                }
                error
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn delete_many(&self, ids: &[i64]) -> Result<()> {
        sqlx::query("DELETE FROM matches WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(self.pool)
            .await
            .map_err(|e| {
                let error = StorageError::from(e);
                if error.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(
                        "Match is still referenced by match odds".to_string(),
                    );
                }
                error
            })?;

        Ok(())
    }
}

fn push_search_filters<'args>(
    query: &mut QueryBuilder<'args, Postgres>,
    filter: &'args MatchSearchFilter,
) {
    if let Some(ref description) = filter.description {
        query.push(" AND description = ");
        query.push_bind(description);
    }

    if let Some(ref team_a) = filter.team_a {
        query.push(" AND team_a = ");
        query.push_bind(team_a);
    }

    if let Some(ref team_b) = filter.team_b {
        query.push(" AND team_b = ");
        query.push_bind(team_b);
    }

    if let Some(sport) = filter.sport {
        query.push(" AND sport = ");
        query.push_bind(sport);
    }

    if let Some(match_date) = filter.match_date {
        query.push(" AND match_date = ");
        query.push_bind(match_date);
    }

    if let Some(match_date_before) = filter.match_date_before {
        query.push(" AND match_date < ");
        query.push_bind(match_date_before);
    }

    if let Some(match_date_after) = filter.match_date_after {
        query.push(" AND match_date > ");
        query.push_bind(match_date_after);
    }

    if let Some(match_time) = filter.match_time {
        query.push(" AND match_time = ");
        query.push_bind(match_time);
    }

    if let Some(match_time_before) = filter.match_time_before {
        query.push(" AND match_time < ");
        query.push_bind(match_time_before);
    }

    if let Some(match_time_after) = filter.match_time_after {
        query.push(" AND match_time > ");
        query.push_bind(match_time_after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::Sport;

    #[test]
    fn no_filters_build_a_bare_query() {
        let filter = MatchSearchFilter::default();
        let mut query = QueryBuilder::new("SELECT 1 FROM matches WHERE 1=1");
        push_search_filters(&mut query, &filter);

        assert_eq!(query.sql(), "SELECT 1 FROM matches WHERE 1=1");
    }

    #[test]
    fn present_filters_are_anded_with_strict_bounds() {
        let filter = MatchSearchFilter {
            team_a: Some("OSFP".to_string()),
            sport: Some(Sport::Football),
            match_date_before: Some(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap()),
            match_time_after: Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
            ..Default::default()
        };
        let mut query = QueryBuilder::new("SELECT 1 FROM matches WHERE 1=1");
        push_search_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains(" AND team_a = $1"));
        assert!(sql.contains(" AND sport = $2"));
        assert!(sql.contains(" AND match_date < $3"));
        assert!(sql.contains(" AND match_time > $4"));
        assert!(!sql.contains("description"));
        assert!(!sql.contains("match_date >"));
    }

    #[test]
    fn equality_filters_use_equals() {
        let filter = MatchSearchFilter {
            description: Some("OSFP-PAO".to_string()),
            match_date: Some(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            match_time: Some(NaiveTime::from_hms_opt(20, 0, 0).unwrap()),
            ..Default::default()
        };
        let mut query = QueryBuilder::new("SELECT 1 FROM matches WHERE 1=1");
        push_search_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains(" AND description = $1"));
        assert!(sql.contains(" AND match_date = $2"));
        assert!(sql.contains(" AND match_time = $3"));
    }
}
