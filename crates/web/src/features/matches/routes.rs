use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{
    count_matches, create_matches, delete_match, delete_matches, get_match, get_matches_by_ids,
    get_odds_for_match, patch_match, search_matches, update_match, update_matches_batch,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route(
            "/",
            get(search_matches)
                .post(create_matches)
                .delete(delete_matches),
        )
        .route("/count", get(count_matches))
        .route("/byIdsList", get(get_matches_by_ids))
        .route("/batch", put(update_matches_batch))
        .route(
            "/:id",
            get(get_match)
                .put(update_match)
                .patch(patch_match)
                .delete(delete_match),
        )
        .route("/:id/odds", get(get_odds_for_match))
}
