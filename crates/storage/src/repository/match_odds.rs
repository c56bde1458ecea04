use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::match_odds::{CreateMatchOddsRequest, OddsSearchFilter};
use crate::error::{Result, StorageError};
use crate::models::MatchOdds;

const COLUMNS: &str = "id, match_id, specifier, odd";

pub struct MatchOddsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchOddsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<MatchOdds>> {
        let query = format!("SELECT {COLUMNS} FROM match_odds");
        let odds = sqlx::query_as::<_, MatchOdds>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(odds)
    }

    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<MatchOdds>> {
        let query = format!("SELECT {COLUMNS} FROM match_odds WHERE id = ANY($1)");
        let odds = sqlx::query_as::<_, MatchOdds>(&query)
            .bind(ids.to_vec())
            .fetch_all(self.pool)
            .await?;

        Ok(odds)
    }

    /// All odds recorded for one match.
    pub async fn list_by_match(&self, match_id: i64) -> Result<Vec<MatchOdds>> {
        let query = format!("SELECT {COLUMNS} FROM match_odds WHERE match_id = $1");
        let odds = sqlx::query_as::<_, MatchOdds>(&query)
            .bind(match_id)
            .fetch_all(self.pool)
            .await?;

        Ok(odds)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<MatchOdds> {
        let query = format!("SELECT {COLUMNS} FROM match_odds WHERE id = $1");
        let found = sqlx::query_as::<_, MatchOdds>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(found)
    }

    pub async fn search(&self, filter: &OddsSearchFilter) -> Result<Vec<MatchOdds>> {
        let mut query = QueryBuilder::new(format!("SELECT {COLUMNS} FROM match_odds WHERE 1=1"));
        push_search_filters(&mut query, filter);

        let odds = query.build_query_as().fetch_all(self.pool).await?;

        Ok(odds)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM match_odds")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn insert(&self, req: &CreateMatchOddsRequest) -> Result<MatchOdds> {
        let query = format!(
            "INSERT INTO match_odds (match_id, specifier, odd)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let saved = sqlx::query_as::<_, MatchOdds>(&query)
            .bind(req.match_ref.id)
            .bind(&req.specifier)
            .bind(req.odd)
            .fetch_one(self.pool)
            .await?;

        Ok(saved)
    }

    pub async fn insert_many(&self, reqs: &[CreateMatchOddsRequest]) -> Result<Vec<MatchOdds>> {
        let mut saved = Vec::with_capacity(reqs.len());
        for req in reqs {
            saved.push(self.insert(req).await?);
        }

        Ok(saved)
    }

    pub async fn update(&self, id: i64, odds: &MatchOdds) -> Result<MatchOdds> {
        let query = format!(
            "UPDATE match_odds
             SET match_id = $2,
                 specifier = $3,
                 odd = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, MatchOdds>(&query)
            .bind(id)
            .bind(odds.match_id)
            .bind(&odds.specifier)
            .bind(odds.odd)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM match_odds WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn delete_many(&self, ids: &[i64]) -> Result<()> {
        sqlx::query("DELETE FROM match_odds WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

fn push_search_filters<'args>(
    query: &mut QueryBuilder<'args, Postgres>,
    filter: &'args OddsSearchFilter,
) {
    if let Some(ref specifier) = filter.specifier {
        query.push(" AND specifier = ");
        query.push_bind(specifier);
    }

    if let Some(odd) = filter.odd {
        query.push(" AND odd = ");
        query.push_bind(odd);
    }

    if let Some(odd_over) = filter.odd_over {
        query.push(" AND odd > ");
        query.push_bind(odd_over);
    }

    if let Some(odd_under) = filter.odd_under {
        query.push(" AND odd < ");
        query.push_bind(odd_under);
    }

    if let Some(match_id) = filter.match_id {
        query.push(" AND match_id = ");
        query.push_bind(match_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_build_a_bare_query() {
        let filter = OddsSearchFilter::default();
        let mut query = QueryBuilder::new("SELECT 1 FROM match_odds WHERE 1=1");
        push_search_filters(&mut query, &filter);

        assert_eq!(query.sql(), "SELECT 1 FROM match_odds WHERE 1=1");
    }

    #[test]
    fn odd_bounds_are_strict() {
        let filter = OddsSearchFilter {
            specifier: Some("2".to_string()),
            odd_over: Some(2.0),
            odd_under: Some(2.4),
            match_id: Some(5),
            ..Default::default()
        };
        let mut query = QueryBuilder::new("SELECT 1 FROM match_odds WHERE 1=1");
        push_search_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains(" AND specifier = $1"));
        assert!(sql.contains(" AND odd > $2"));
        assert!(sql.contains(" AND odd < $3"));
        assert!(sql.contains(" AND match_id = $4"));
        assert!(!sql.contains(" AND odd = "));
    }

    #[test]
    fn exact_odd_filter_uses_equality() {
        let filter = OddsSearchFilter {
            odd: Some(1.85),
            ..Default::default()
        };
        let mut query = QueryBuilder::new("SELECT 1 FROM match_odds WHERE 1=1");
        push_search_filters(&mut query, &filter);

        assert!(query.sql().contains(" AND odd = $1"));
    }
}
