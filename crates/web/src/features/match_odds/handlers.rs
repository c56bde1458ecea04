use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use storage::{
    Database,
    dto::{
        common::IdListQuery,
        match_odds::{
            CreateMatchOddsRequest, MatchOddsResponse, MatchOddsUpdateItem, OddsSearchFilter,
        },
    },
};
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/matchOdds",
    params(OddsSearchFilter),
    responses(
        (status = 200, description = "Filtered list of odds", body = Vec<MatchOddsResponse>)
    ),
    tag = "matchOdds"
)]
pub async fn search_odds(
    State(db): State<Database>,
    Query(filter): Query<OddsSearchFilter>,
) -> WebResult<Response> {
    let odds = services::search_odds(db.pool(), &filter).await?;

    let response: Vec<MatchOddsResponse> = odds.into_iter().map(MatchOddsResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matchOdds/{id}",
    params(
        ("id" = i64, Path, description = "Odds id")
    ),
    responses(
        (status = 200, description = "Odds found", body = MatchOddsResponse),
        (status = 404, description = "Odds not found")
    ),
    tag = "matchOdds"
)]
pub async fn get_odds(State(db): State<Database>, Path(id): Path<i64>) -> WebResult<Response> {
    let found = services::get_odds(db.pool(), id).await?;

    Ok(Json(MatchOddsResponse::from(found)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matchOdds/byIdsList",
    params(IdListQuery),
    responses(
        (status = 200, description = "Odds for the given ids; missing ids are omitted", body = Vec<MatchOddsResponse>),
        (status = 400, description = "Malformed id list")
    ),
    tag = "matchOdds"
)]
pub async fn get_odds_by_ids(
    State(db): State<Database>,
    Query(query): Query<IdListQuery>,
) -> WebResult<Response> {
    let ids = query.parse().map_err(WebError::BadRequest)?;
    let odds = services::list_odds_by_ids(db.pool(), &ids).await?;

    let response: Vec<MatchOddsResponse> = odds.into_iter().map(MatchOddsResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matchOdds/count",
    responses(
        (status = 200, description = "Total number of odds records", body = i64)
    ),
    tag = "matchOdds"
)]
pub async fn count_odds(State(db): State<Database>) -> WebResult<Response> {
    let count = services::count_odds(db.pool()).await?;

    Ok(Json(count).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matchOdds",
    request_body = CreateMatchOddsRequest,
    responses(
        (status = 200, description = "Saved odds (or array of odds for an array body)", body = MatchOddsResponse),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Referenced match does not exist")
    ),
    tag = "matchOdds"
)]
pub async fn create_odds(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> WebResult<Response> {
    // A single object and an array of objects are both accepted here.
    if body.is_array() {
        let reqs: Vec<CreateMatchOddsRequest> = serde_json::from_value(body)
            .map_err(|e| WebError::BadRequest(format!("Invalid odds payload: {e}")))?;
        for req in &reqs {
            req.validate()?;
        }

        let saved = services::create_odds_batch(db.pool(), &reqs).await?;
        let response: Vec<MatchOddsResponse> =
            saved.into_iter().map(MatchOddsResponse::from).collect();

        Ok(Json(response).into_response())
    } else {
        let req: CreateMatchOddsRequest = serde_json::from_value(body)
            .map_err(|e| WebError::BadRequest(format!("Invalid odds payload: {e}")))?;
        req.validate()?;

        let saved = services::create_odds(db.pool(), &req).await?;

        Ok(Json(MatchOddsResponse::from(saved)).into_response())
    }
}

#[utoipa::path(
    put,
    path = "/api/matchOdds/{id}",
    params(
        ("id" = i64, Path, description = "Odds id")
    ),
    request_body = CreateMatchOddsRequest,
    responses(
        (status = 200, description = "Odds replaced", body = MatchOddsResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Odds or referenced match not found")
    ),
    tag = "matchOdds"
)]
pub async fn update_odds(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<CreateMatchOddsRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let updated = services::update_odds(db.pool(), id, &req).await?;

    Ok(Json(MatchOddsResponse::from(updated)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matchOdds/batch",
    request_body = Vec<MatchOddsUpdateItem>,
    responses(
        (status = 200, description = "All odds replaced", body = Vec<MatchOddsResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "A listed odds row or referenced match does not exist")
    ),
    tag = "matchOdds"
)]
pub async fn update_odds_batch(
    State(db): State<Database>,
    Json(items): Json<Vec<MatchOddsUpdateItem>>,
) -> WebResult<Response> {
    for item in &items {
        item.validate()?;
    }

    let updated = services::update_odds_batch(db.pool(), &items).await?;
    let response: Vec<MatchOddsResponse> =
        updated.into_iter().map(MatchOddsResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/matchOdds/{id}",
    params(
        ("id" = i64, Path, description = "Odds id")
    ),
    responses(
        (status = 200, description = "Partially updated odds", body = MatchOddsResponse),
        (status = 400, description = "Unknown field or malformed value"),
        (status = 404, description = "Odds or referenced match not found")
    ),
    tag = "matchOdds"
)]
pub async fn patch_odds(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(updates): Json<Map<String, Value>>,
) -> WebResult<Response> {
    let updated = services::partial_update_odds(db.pool(), id, &updates).await?;

    Ok(Json(MatchOddsResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matchOdds/{id}",
    params(
        ("id" = i64, Path, description = "Odds id")
    ),
    responses(
        (status = 200, description = "Odds deleted"),
        (status = 404, description = "Odds not found")
    ),
    tag = "matchOdds"
)]
pub async fn delete_odds(State(db): State<Database>, Path(id): Path<i64>) -> WebResult<Response> {
    services::delete_odds(db.pool(), id).await?;

    Ok(().into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matchOdds",
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "Odds deleted")
    ),
    tag = "matchOdds"
)]
pub async fn delete_odds_batch(
    State(db): State<Database>,
    Json(ids): Json<Vec<i64>>,
) -> WebResult<Response> {
    services::delete_odds_batch(db.pool(), &ids).await?;

    Ok(().into_response())
}
