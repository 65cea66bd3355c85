// OpenWeatherMap client implementation
use crate::application::weather_provider::{CombinedWeather, WeatherProvider};
use crate::domain::location::Location;
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::WeatherSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            units: settings.units.clone(),
        })
    }

    fn query_params(&self, location: &Location) -> Vec<(&'static str, String)> {
        let mut params = location_params(location);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.clone()));
        params
    }

    async fn get_json(&self, endpoint: &str, location: &Location) -> AppResult<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(location))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, %status, "weather provider returned an error");
            return Err(AppError::UpstreamWeather {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(transport_error)
    }
}

/// Coordinates go out as `lat`/`lon`, everything else as the `q` search term.
fn location_params(location: &Location) -> Vec<(&'static str, String)> {
    match location {
        Location::Place(name) => vec![("q", name.clone())],
        Location::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    let status = if err.is_timeout() {
        StatusCode::GATEWAY_TIMEOUT
    } else {
        StatusCode::BAD_GATEWAY
    };
    tracing::warn!(error = %err, "weather provider request failed");
    AppError::UpstreamWeather {
        status: status.as_u16(),
        body: err.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, location: &Location) -> AppResult<CombinedWeather> {
        let (current, forecast) = futures::try_join!(
            self.get_json("weather", location),
            self.get_json("forecast", location),
        )?;

        Ok(CombinedWeather { current, forecast })
    }
}
