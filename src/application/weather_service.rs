// Weather service - Use cases for live lookups and aggregated forecasts
use crate::application::weather_provider::{CombinedWeather, WeatherProvider};
use crate::domain::forecast::{aggregate, ForecastDay, ForecastPayload};
use crate::domain::location::Location;
use crate::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    forecast_days: usize,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, forecast_days: usize) -> Self {
        Self {
            provider,
            forecast_days,
        }
    }

    /// Resolve `location` (place name or "lat,lon") and fetch both payloads.
    pub async fn fetch(&self, location: &str) -> AppResult<CombinedWeather> {
        let location = Location::parse(location)?;
        self.provider.fetch(&location).await
    }

    /// Fetch the forecast for `location` and reduce it to one entry per day.
    pub async fn daily_forecast(&self, location: &str) -> AppResult<Vec<ForecastDay>> {
        let weather = self.fetch(location).await?;
        let payload: ForecastPayload = serde_json::from_value(weather.forecast)
            .map_err(|e| AppError::MalformedUpstreamPayload(e.to_string()))?;

        let days = aggregate(&payload.list, self.forecast_days);
        tracing::debug!(
            location,
            samples = payload.list.len(),
            days = days.len(),
            "aggregated forecast"
        );
        Ok(days)
    }
}
