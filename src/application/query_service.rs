// Query service - Use cases for creating and maintaining stored weather queries
use crate::application::query_repository::QueryRepository;
use crate::application::weather_service::WeatherService;
use crate::domain::weather_query::{
    parse_date, validate_date_range, NewWeatherQuery, WeatherQuery, WeatherQueryPatch,
};
use crate::error::{AppError, AppResult};
use std::sync::Arc;

/// Raw create input. Empty strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct CreateQueryInput {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Raw update input. Empty strings count as "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct UpdateQueryInput {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone)]
pub struct QueryService {
    repository: Arc<dyn QueryRepository>,
    weather: WeatherService,
}

impl QueryService {
    pub fn new(repository: Arc<dyn QueryRepository>, weather: WeatherService) -> Self {
        Self {
            repository,
            weather,
        }
    }

    /// Validate, fetch a weather snapshot for the location, then persist.
    pub async fn create(&self, input: CreateQueryInput) -> AppResult<i64> {
        let location = non_empty(input.location).ok_or(AppError::MissingParameter("location"))?;
        let start_date =
            non_empty(input.start_date).ok_or(AppError::MissingParameter("start_date"))?;
        let end_date = non_empty(input.end_date).ok_or(AppError::MissingParameter("end_date"))?;
        validate_date_range(&start_date, &end_date)?;

        let weather = self
            .weather
            .fetch(&location)
            .await
            .map_err(AppError::into_validation)?;
        let weather_data = serde_json::to_value(weather).map_err(anyhow::Error::from)?;

        let id = self
            .repository
            .create(NewWeatherQuery {
                location: location.clone(),
                start_date,
                end_date,
                weather_data,
            })
            .await?;

        tracing::info!(id, location = %location, "created weather query");
        Ok(id)
    }

    pub async fn list(&self) -> AppResult<Vec<WeatherQuery>> {
        Ok(self.repository.list().await?)
    }

    /// Apply each provided field independently. A new location re-fetches the
    /// weather snapshot; date changes do not.
    pub async fn update(&self, id: i64, input: UpdateQueryInput) -> AppResult<()> {
        self.ensure_exists(id).await?;

        let mut patch = WeatherQueryPatch {
            location: non_empty(input.location),
            start_date: non_empty(input.start_date),
            end_date: non_empty(input.end_date),
            weather_data: None,
        };
        if let Some(start_date) = &patch.start_date {
            parse_date("start_date", start_date)?;
        }
        if let Some(end_date) = &patch.end_date {
            parse_date("end_date", end_date)?;
        }
        if let Some(location) = &patch.location {
            let weather = self
                .weather
                .fetch(location)
                .await
                .map_err(AppError::into_validation)?;
            patch.weather_data = Some(serde_json::to_value(weather).map_err(anyhow::Error::from)?);
        }

        if patch.is_empty() {
            return Ok(());
        }
        if !self.repository.update(id, patch).await? {
            return Err(AppError::RecordNotFound(id));
        }

        tracing::info!(id, "updated weather query");
        Ok(())
    }

    pub async fn ensure_exists(&self, id: i64) -> AppResult<()> {
        match self.repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::RecordNotFound(id)),
        }
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::RecordNotFound(id));
        }
        tracing::info!(id, "deleted weather query");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
