// Weather query domain model
use crate::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column order used when exporting stored queries.
pub const WEATHER_QUERY_COLUMNS: [&str; 6] = [
    "id",
    "location",
    "start_date",
    "end_date",
    "created_at",
    "weather_data",
];

/// A persisted lookup: location, date range and the weather snapshot fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub id: i64,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: DateTime<Utc>,
    pub weather_data: Value,
}

#[derive(Debug, Clone)]
pub struct NewWeatherQuery {
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub weather_data: Value,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct WeatherQueryPatch {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub weather_data: Option<Value>,
}

impl WeatherQueryPatch {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.weather_data.is_none()
    }
}

pub fn parse_date(field: &'static str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat {
        field,
        value: value.to_string(),
    })
}

/// Checks both dates and that the range is not inverted.
pub fn validate_date_range(start: &str, end: &str) -> AppResult<()> {
    let start_date = parse_date("start_date", start)?;
    let end_date = parse_date("end_date", end)?;
    if start_date > end_date {
        return Err(AppError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
