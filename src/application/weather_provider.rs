// Provider trait for live weather data
use crate::domain::location::Location;
use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current conditions and forecast exactly as the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedWeather {
    pub current: Value,
    pub forecast: Value,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions and the multi-day forecast. Either call failing
    /// fails the whole lookup with `AppError::UpstreamWeather`.
    async fn fetch(&self, location: &Location) -> AppResult<CombinedWeather>;
}
