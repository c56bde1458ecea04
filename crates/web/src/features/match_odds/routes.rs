use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{
    count_odds, create_odds, delete_odds, delete_odds_batch, get_odds, get_odds_by_ids, patch_odds,
    search_odds, update_odds, update_odds_batch,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/",
            get(search_odds).post(create_odds).delete(delete_odds_batch),
        )
        .route("/count", get(count_odds))
        .route("/byIdsList", get(get_odds_by_ids))
        .route("/batch", put(update_odds_batch))
        .route(
            "/:id",
            get(get_odds)
                .put(update_odds)
                .patch(patch_odds)
                .delete(delete_odds),
        )
}
