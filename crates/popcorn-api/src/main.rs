//! Popcorn Initiative API server entry point.

use std::error::Error;

use axum::Router;
use popcorn_api::config::ApiConfig;
use popcorn_api::routes;
use popcorn_api::state::AppState;
use popcorn_initiative::domain::manager::InitiativeManager;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Popcorn Initiative API server");

    // Read configuration from environment.
    let config = ApiConfig::from_env()?;
    if config.rng_seed.is_some() {
        tracing::warn!("POPCORN_RNG_SEED is set; turn selection is reproducible");
    }

    // Build application state. The registry lives for the whole process.
    let manager = InitiativeManager::new(Box::new(config.rng()));
    let app_state = AppState::new(manager, config.manager_roles.clone());

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/channels", routes::channels::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!(manager_roles = ?config.manager_roles.names(), "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
