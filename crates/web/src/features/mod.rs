use axum::Router;
use storage::Database;

pub mod match_odds;
pub mod matches;

pub fn api_routes() -> Router<Database> {
    Router::new()
        .nest("/matches", matches::routes())
        .nest("/matchOdds", match_odds::routes())
}
