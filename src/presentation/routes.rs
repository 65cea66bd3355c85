// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_weather_query, delete_weather_query, export_forecast, export_weather_queries,
    get_map_link, get_weather, health_check, list_weather_queries, update_weather_query,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/weather", get(get_weather))
        .route("/weatherQuery", post(create_weather_query))
        .route(
            "/weatherQuery/:id",
            put(update_weather_query).delete(delete_weather_query),
        )
        .route("/weatherQueries", get(list_weather_queries))
        .route("/export", get(export_weather_queries))
        .route("/exportForecast", get(export_forecast))
        .route("/maps", get(get_map_link));

    Router::new()
        .route("/healthz", get(health_check))
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
