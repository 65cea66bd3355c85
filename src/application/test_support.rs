// Test doubles shared by service and handler tests
use crate::application::weather_provider::{CombinedWeather, WeatherProvider};
use crate::domain::location::Location;
use crate::error::{AppError, AppResult};
use crate::infrastructure::sqlite_repository::SqliteQueryRepository;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Answers every lookup with a fixed result and remembers what was asked.
#[derive(Default)]
pub struct RecordingProvider {
    forecast: Value,
    failure: Option<(u16, String)>,
    /// Restricts `failure` to this place name; `None` fails every lookup
    failing_place: Option<String>,
    calls: Mutex<Vec<Location>>,
}

impl RecordingProvider {
    pub fn with_forecast(forecast: Value) -> Self {
        Self {
            forecast,
            ..Default::default()
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            ..Default::default()
        }
    }

    /// Fails only lookups for `place`, everything else succeeds.
    pub fn failing_for(place: &str, status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            failing_place: Some(place.to_string()),
            ..Default::default()
        }
    }

    fn fails(&self, location: &Location) -> bool {
        match (&self.failing_place, location) {
            (None, _) => true,
            (Some(place), Location::Place(name)) => place == name,
            (Some(_), Location::Coordinates { .. }) => false,
        }
    }

    pub async fn calls(&self) -> Vec<Location> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl WeatherProvider for RecordingProvider {
    async fn fetch(&self, location: &Location) -> AppResult<CombinedWeather> {
        self.calls.lock().await.push(location.clone());

        if let Some((status, body)) = self.failure.as_ref().filter(|_| self.fails(location)) {
            return Err(AppError::UpstreamWeather {
                status: *status,
                body: body.clone(),
            });
        }

        let name = match location {
            Location::Place(name) => name.clone(),
            Location::Coordinates { lat, lon } => format!("{lat},{lon}"),
        };
        Ok(CombinedWeather {
            current: json!({"name": name, "main": {"temp": 21.5}}),
            forecast: self.forecast.clone(),
        })
    }
}

pub async fn memory_repository() -> Arc<SqliteQueryRepository> {
    let pool = crate::infrastructure::sqlite_repository::init_pool("sqlite::memory:")
        .await
        .unwrap();
    let repository = SqliteQueryRepository::new(pool);
    repository.ensure_schema().await.unwrap();
    Arc::new(repository)
}
