// Application state for HTTP handlers
use crate::application::query_service::QueryService;
use crate::application::weather_service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: WeatherService,
    pub query_service: QueryService,
    pub maps_search_url: String,
}
