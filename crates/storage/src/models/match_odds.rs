use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchOdds {
    pub id: i64,
    pub match_id: i64,
    pub specifier: String,
    pub odd: f64,
}
