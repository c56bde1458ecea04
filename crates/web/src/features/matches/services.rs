use serde_json::{Map, Value};
use sqlx::PgPool;
use storage::{
    dto::matches::{CreateMatchRequest, MatchFieldUpdate, MatchSearchFilter, MatchUpdateItem},
    error::Result,
    models::Match,
    repository::matches::MatchRepository,
    services::team_sync,
};

pub async fn list_matches(pool: &PgPool) -> Result<Vec<Match>> {
    let repo = MatchRepository::new(pool);
    repo.list().await
}

pub async fn list_matches_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<Match>> {
    let repo = MatchRepository::new(pool);
    repo.list_by_ids(ids).await
}

pub async fn get_match(pool: &PgPool, id: i64) -> Result<Match> {
    let repo = MatchRepository::new(pool);
    repo.find_by_id(id).await
}

pub async fn search_matches(pool: &PgPool, filter: &MatchSearchFilter) -> Result<Vec<Match>> {
    let repo = MatchRepository::new(pool);
    repo.search(filter).await
}

pub async fn count_matches(pool: &PgPool) -> Result<i64> {
    let repo = MatchRepository::new(pool);
    repo.count().await
}

/// Create a match exactly as given; the description/team invariant is only
/// enforced on update paths.
pub async fn create_match(pool: &PgPool, req: &CreateMatchRequest) -> Result<Match> {
    let repo = MatchRepository::new(pool);
    repo.insert(req).await
}

pub async fn create_matches(pool: &PgPool, reqs: &[CreateMatchRequest]) -> Result<Vec<Match>> {
    let repo = MatchRepository::new(pool);
    repo.insert_many(reqs).await
}

/// Full replace: the row must exist, and the teams win over a disagreeing
/// description.
pub async fn update_match(pool: &PgPool, id: i64, req: &CreateMatchRequest) -> Result<Match> {
    let repo = MatchRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let mut replacement = Match {
        id: existing.id,
        description: req.description.clone(),
        match_date: req.match_date,
        match_time: req.match_time,
        team_a: req.team_a.clone(),
        team_b: req.team_b.clone(),
        sport: req.sport,
    };
    team_sync::normalize(&mut replacement);

    repo.update(id, &replacement).await
}

pub async fn update_matches(pool: &PgPool, items: &[MatchUpdateItem]) -> Result<Vec<Match>> {
    let mut updated = Vec::with_capacity(items.len());
    for item in items {
        updated.push(update_match(pool, item.id, &item.fields).await?);
    }

    Ok(updated)
}

/// Field-masked update: parse the payload into typed field updates, apply
/// them to the loaded record and reconcile teams with the description.
pub async fn partial_update_match(
    pool: &PgPool,
    id: i64,
    updates: &Map<String, Value>,
) -> Result<Match> {
    let repo = MatchRepository::new(pool);
    let current = repo.find_by_id(id).await?;

    let fields = MatchFieldUpdate::parse_map(updates)?;
    let updated = team_sync::apply_updates(&current, &fields)?;

    repo.update(id, &updated).await
}

pub async fn delete_match(pool: &PgPool, id: i64) -> Result<()> {
    let repo = MatchRepository::new(pool);
    repo.delete(id).await
}

pub async fn delete_matches(pool: &PgPool, ids: &[i64]) -> Result<()> {
    let repo = MatchRepository::new(pool);
    repo.delete_many(ids).await
}
