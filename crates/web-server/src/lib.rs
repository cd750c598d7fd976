use analytics::HappinessEngine;
use axum::{
    routing::{get, post},
    Router,
};
use configuration::Config;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub engine: HappinessEngine,
}

/// Builds the router with every route and middleware attached.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/happiness", get(handlers::get_happiness))
        .route("/api/averages", get(handlers::get_averages))
        .route("/api/entries", post(handlers::post_entry))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Tracing is initialized by the caller.
    let addr = config.server.socket_addr()?;

    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;

    let engine = HappinessEngine::new(config.aggregation.policy, config.reporting_zone()?)
        .with_smoothing(config.aggregation.smooth_series);
    let state = Arc::new(AppState {
        db_repo: DbRepository::new(db_pool),
        engine,
    });

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
