// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::query_service::QueryService;
use crate::application::weather_service::WeatherService;
use crate::infrastructure::config::{load_app_config, DEFAULT_API_KEY};
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::infrastructure::sqlite_repository::{init_pool, SqliteQueryRepository};
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Load configuration
    let config = load_app_config()?;
    if config.weather.api_key == DEFAULT_API_KEY {
        tracing::warn!("OPENWEATHER_API_KEY is not set, using the placeholder key");
    }

    // Create repository (infrastructure layer)
    let pool = init_pool(&config.database.url).await?;
    let repository = SqliteQueryRepository::new(pool);
    repository.ensure_schema().await?;
    let provider = OpenWeatherClient::new(&config.weather)?;

    // Create services (application layer)
    let weather_service = WeatherService::new(Arc::new(provider), config.weather.forecast_days);
    let query_service = QueryService::new(Arc::new(repository), weather_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        weather_service,
        query_service,
        maps_search_url: config.maps.search_url.clone(),
    });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, database = %config.database.url, "starting weather query service");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
