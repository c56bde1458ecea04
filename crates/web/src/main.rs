use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::matches::handlers::search_matches,
        features::matches::handlers::get_match,
        features::matches::handlers::get_matches_by_ids,
        features::matches::handlers::count_matches,
        features::matches::handlers::get_odds_for_match,
        features::matches::handlers::create_matches,
        features::matches::handlers::update_match,
        features::matches::handlers::update_matches_batch,
        features::matches::handlers::patch_match,
        features::matches::handlers::delete_match,
        features::matches::handlers::delete_matches,
        features::match_odds::handlers::search_odds,
        features::match_odds::handlers::get_odds,
        features::match_odds::handlers::get_odds_by_ids,
        features::match_odds::handlers::count_odds,
        features::match_odds::handlers::create_odds,
        features::match_odds::handlers::update_odds,
        features::match_odds::handlers::update_odds_batch,
        features::match_odds::handlers::patch_odds,
        features::match_odds::handlers::delete_odds,
        features::match_odds::handlers::delete_odds_batch,
    ),
    components(
        schemas(
            storage::dto::matches::MatchResponse,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::MatchUpdateItem,
            storage::dto::match_odds::MatchOddsResponse,
            storage::dto::match_odds::CreateMatchOddsRequest,
            storage::dto::match_odds::MatchOddsUpdateItem,
            storage::dto::match_odds::MatchRef,
            storage::models::Match,
            storage::models::MatchOdds,
            storage::models::Sport,
        )
    ),
    tags(
        (name = "matches", description = "Match endpoints"),
        (name = "matchOdds", description = "Match odds endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting Match Management API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", features::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM so the server shuts down cleanly whether
/// stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
