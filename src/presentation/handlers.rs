// HTTP request handlers
use crate::application::query_service::{CreateQueryInput, UpdateQueryInput};
use crate::application::weather_provider::CombinedWeather;
use crate::domain::forecast::FORECAST_DAY_COLUMNS;
use crate::domain::weather_query::{WeatherQuery, WEATHER_QUERY_COLUMNS};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::prepare_template;
use crate::infrastructure::export::{format_records, ExportFormat};
use crate::infrastructure::http_response::export_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LocationQuery {
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Deserialize)]
pub struct ForecastExportQuery {
    pub location: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQueryBody {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn required_location(location: Option<String>) -> AppResult<String> {
    location
        .filter(|l| !l.is_empty())
        .ok_or(AppError::MissingParameter("location"))
}

fn parse_format(format: Option<&str>) -> AppResult<ExportFormat> {
    format.map_or(Ok(ExportFormat::default()), str::parse)
}

fn json_body(payload: Result<Json<WeatherQueryBody>, JsonRejection>) -> AppResult<WeatherQueryBody> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

fn query_id(id: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Live current conditions and forecast for a place name or "lat,lon"
pub async fn get_weather(
    Query(query): Query<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<CombinedWeather>> {
    let location = required_location(query.location)?;
    let weather = state
        .weather_service
        .fetch(&location)
        .await
        .map_err(AppError::into_validation)?;
    Ok(Json(weather))
}

pub async fn create_weather_query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WeatherQueryBody>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let body = json_body(payload)?;
    let id = state
        .query_service
        .create(CreateQueryInput {
            location: body.location,
            start_date: body.start_date,
            end_date: body.end_date,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Weather query created successfully", "id": id})),
    ))
}

pub async fn list_weather_queries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<WeatherQuery>>> {
    Ok(Json(state.query_service.list().await?))
}

pub async fn update_weather_query(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WeatherQueryBody>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let id = query_id(id)?;
    // A missing record wins over a bad body
    state.query_service.ensure_exists(id).await?;
    let body = json_body(payload)?;
    state
        .query_service
        .update(
            id,
            UpdateQueryInput {
                location: body.location,
                start_date: body.start_date,
                end_date: body.end_date,
            },
        )
        .await?;

    Ok(Json(json!({"message": "Weather query updated successfully"})))
}

pub async fn delete_weather_query(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> AppResult<impl IntoResponse> {
    let id = query_id(id)?;
    state.query_service.delete(id).await?;
    Ok(Json(json!({"message": "Weather query deleted successfully"})))
}

/// Export every stored query as JSON or CSV
pub async fn export_weather_queries(
    Query(query): Query<ExportQuery>,
    State(state): State<Arc<AppState>>,
) -> AppResult<impl IntoResponse> {
    let format = parse_format(query.format.as_deref())?;
    let queries = state.query_service.list().await?;
    export_response(format_records(&queries, &WEATHER_QUERY_COLUMNS, format)?)
}

/// Export the daily forecast summary for a location as JSON or CSV
pub async fn export_forecast(
    Query(query): Query<ForecastExportQuery>,
    State(state): State<Arc<AppState>>,
) -> AppResult<impl IntoResponse> {
    let location = required_location(query.location)?;
    let format = parse_format(query.format.as_deref())?;
    let days = state.weather_service.daily_forecast(&location).await?;
    export_response(format_records(&days, &FORECAST_DAY_COLUMNS, format)?)
}

/// Map search link for a location, no external call
pub async fn get_map_link(
    Query(query): Query<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> AppResult<impl IntoResponse> {
    let location = required_location(query.location)?;

    let mut vars = HashMap::new();
    vars.insert("location".to_string(), urlencoding::encode(&location).into_owned());
    let map_url = prepare_template(&state.maps_search_url, &vars);

    Ok(Json(json!({"map_url": map_url})))
}
