use serde_json::{Map, Value};
use sqlx::PgPool;
use storage::{
    dto::match_odds::{
        CreateMatchOddsRequest, MatchOddsUpdateItem, OddsFieldUpdate, OddsSearchFilter,
    },
    error::Result,
    models::MatchOdds,
    repository::{match_odds::MatchOddsRepository, matches::MatchRepository},
};

pub async fn list_odds(pool: &PgPool) -> Result<Vec<MatchOdds>> {
    let repo = MatchOddsRepository::new(pool);
    repo.list().await
}

pub async fn list_odds_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<MatchOdds>> {
    let repo = MatchOddsRepository::new(pool);
    repo.list_by_ids(ids).await
}

/// All odds for one match; the match itself must exist.
pub async fn list_odds_for_match(pool: &PgPool, match_id: i64) -> Result<Vec<MatchOdds>> {
    MatchRepository::new(pool).find_by_id(match_id).await?;

    let repo = MatchOddsRepository::new(pool);
    repo.list_by_match(match_id).await
}

pub async fn get_odds(pool: &PgPool, id: i64) -> Result<MatchOdds> {
    let repo = MatchOddsRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn search_odds(pool: &PgPool, filter: &OddsSearchFilter) -> Result<Vec<MatchOdds>> {
    let repo = MatchOddsRepository::new(pool);
    repo.search(filter).await
}

pub async fn count_odds(pool: &PgPool) -> Result<i64> {
    let repo = MatchOddsRepository::new(pool);
    repo.count().await
}

/// Create odds after resolving the referenced match.
pub async fn create_odds(pool: &PgPool, req: &CreateMatchOddsRequest) -> Result<MatchOdds> {
    MatchRepository::new(pool).find_by_id(req.match_ref.id).await?;

    let repo = MatchOddsRepository::new(pool);
    repo.insert(req).await
}

pub async fn create_odds_batch(
    pool: &PgPool,
    reqs: &[CreateMatchOddsRequest],
) -> Result<Vec<MatchOdds>> {
    let matches_repo = MatchRepository::new(pool);
    for req in reqs {
        matches_repo.find_by_id(req.match_ref.id).await?;
    }

    let repo = MatchOddsRepository::new(pool);
    repo.insert_many(reqs).await
}

/// Full replace: both the odds row and the newly referenced match must
/// exist.
pub async fn update_odds(pool: &PgPool, id: i64, req: &CreateMatchOddsRequest) -> Result<MatchOdds> {
    let repo = MatchOddsRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    MatchRepository::new(pool).find_by_id(req.match_ref.id).await?;

    let replacement = MatchOdds {
        id: existing.id,
        match_id: req.match_ref.id,
        specifier: req.specifier.clone(),
        odd: req.odd,
    };

    repo.update(id, &replacement).await
}

pub async fn update_odds_batch(
    pool: &PgPool,
    items: &[MatchOddsUpdateItem],
) -> Result<Vec<MatchOdds>> {
    let mut updated = Vec::with_capacity(items.len());
    for item in items {
        updated.push(update_odds(pool, item.id, &item.fields).await?);
    }

    Ok(updated)
}

/// Field-masked update; a supplied match reference is resolved before it
/// replaces the association.
pub async fn partial_update_odds(
    pool: &PgPool,
    id: i64,
    updates: &Map<String, Value>,
) -> Result<MatchOdds> {
    let repo = MatchOddsRepository::new(pool);
    let mut odds = repo.find_by_id(id).await?;

    let fields = OddsFieldUpdate::parse_map(updates)?;
    for field in fields {
        match field {
            OddsFieldUpdate::Specifier(specifier) => odds.specifier = specifier,
            OddsFieldUpdate::Odd(odd) => odds.odd = odd,
            OddsFieldUpdate::Match(match_id) => {
                MatchRepository::new(pool).find_by_id(match_id).await?;
                odds.match_id = match_id;
            }
        }
    }

    repo.update(id, &odds).await
}

pub async fn delete_odds(pool: &PgPool, id: i64) -> Result<()> {
    let repo = MatchOddsRepository::new(pool);
    repo.delete(id).await
}

pub async fn delete_odds_batch(pool: &PgPool, ids: &[i64]) -> Result<()> {
    let repo = MatchOddsRepository::new(pool);
    repo.delete_many(ids).await
}
