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
        match_odds::MatchOddsResponse,
        matches::{CreateMatchRequest, MatchResponse, MatchSearchFilter, MatchUpdateItem},
    },
};
use validator::Validate;

use crate::error::{WebError, WebResult};
use crate::features::match_odds::services as odds_services;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    params(MatchSearchFilter),
    responses(
        (status = 200, description = "Filtered list of matches", body = Vec<MatchResponse>)
    ),
    tag = "matches"
)]
pub async fn search_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchSearchFilter>,
) -> WebResult<Response> {
    let matches = services::search_matches(db.pool(), &filter).await?;

    let response: Vec<MatchResponse> = matches.into_iter().map(MatchResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(State(db): State<Database>, Path(id): Path<i64>) -> WebResult<Response> {
    let found = services::get_match(db.pool(), id).await?;

    Ok(Json(MatchResponse::from(found)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/byIdsList",
    params(IdListQuery),
    responses(
        (status = 200, description = "Matches for the given ids; missing ids are omitted", body = Vec<MatchResponse>),
        (status = 400, description = "Malformed id list")
    ),
    tag = "matches"
)]
pub async fn get_matches_by_ids(
    State(db): State<Database>,
    Query(query): Query<IdListQuery>,
) -> WebResult<Response> {
    let ids = query.parse().map_err(WebError::BadRequest)?;
    let matches = services::list_matches_by_ids(db.pool(), &ids).await?;

    let response: Vec<MatchResponse> = matches.into_iter().map(MatchResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/count",
    responses(
        (status = 200, description = "Total number of match records", body = i64)
    ),
    tag = "matches"
)]
pub async fn count_matches(State(db): State<Database>) -> WebResult<Response> {
    let count = services::count_matches(db.pool()).await?;

    Ok(Json(count).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}/odds",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "All odds recorded for the match", body = Vec<MatchOddsResponse>),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_odds_for_match(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let odds = odds_services::list_odds_for_match(db.pool(), id).await?;

    let response: Vec<MatchOddsResponse> = odds.into_iter().map(MatchOddsResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    responses(
        (status = 200, description = "Saved match (or array of matches for an array body)", body = MatchResponse),
        (status = 400, description = "Malformed payload")
    ),
    tag = "matches"
)]
pub async fn create_matches(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> WebResult<Response> {
    // A single object and an array of objects are both accepted here.
    if body.is_array() {
        let reqs: Vec<CreateMatchRequest> = serde_json::from_value(body)
            .map_err(|e| WebError::BadRequest(format!("Invalid match payload: {e}")))?;
        for req in &reqs {
            req.validate()?;
        }

        let saved = services::create_matches(db.pool(), &reqs).await?;
        let response: Vec<MatchResponse> = saved.into_iter().map(MatchResponse::from).collect();

        Ok(Json(response).into_response())
    } else {
        let req: CreateMatchRequest = serde_json::from_value(body)
            .map_err(|e| WebError::BadRequest(format!("Invalid match payload: {e}")))?;
        req.validate()?;

        let saved = services::create_match(db.pool(), &req).await?;

        Ok(Json(MatchResponse::from(saved)).into_response())
    }
}

#[utoipa::path(
    put,
    path = "/api/matches/{id}",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    request_body = CreateMatchRequest,
    responses(
        (status = 200, description = "Match replaced", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<CreateMatchRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let updated = services::update_match(db.pool(), id, &req).await?;

    Ok(Json(MatchResponse::from(updated)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/batch",
    request_body = Vec<MatchUpdateItem>,
    responses(
        (status = 200, description = "All matches replaced", body = Vec<MatchResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "A listed match does not exist")
    ),
    tag = "matches"
)]
pub async fn update_matches_batch(
    State(db): State<Database>,
    Json(items): Json<Vec<MatchUpdateItem>>,
) -> WebResult<Response> {
    for item in &items {
        item.validate()?;
    }

    let updated = services::update_matches(db.pool(), &items).await?;
    let response: Vec<MatchResponse> = updated.into_iter().map(MatchResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/matches/{id}",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Partially updated match", body = MatchResponse),
        (status = 400, description = "Unknown field or unparseable value"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn patch_match(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(updates): Json<Map<String, Value>>,
) -> WebResult<Response> {
    let updated = services::partial_update_match(db.pool(), id, &updates).await?;

    Ok(Json(MatchResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match deleted"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Match is still referenced by odds")
    ),
    tag = "matches"
)]
pub async fn delete_match(State(db): State<Database>, Path(id): Path<i64>) -> WebResult<Response> {
    services::delete_match(db.pool(), id).await?;

    Ok(().into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches",
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "Matches deleted"),
        (status = 409, description = "A match is still referenced by odds")
    ),
    tag = "matches"
)]
pub async fn delete_matches(
    State(db): State<Database>,
    Json(ids): Json<Vec<i64>>,
) -> WebResult<Response> {
    services::delete_matches(db.pool(), &ids).await?;

    Ok(().into_response())
}
