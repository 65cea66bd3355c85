// Error kinds shared by every layer of the service
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is required.")]
    MissingParameter(&'static str),

    #[error("Invalid {field} format '{value}'. Should be YYYY-MM-DD")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("start_date {start} is after end_date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid coordinates '{0}'. Expected 'lat,lon'")]
    InvalidCoordinateFormat(String),

    /// Non-success answer (or no answer) from the weather provider.
    /// `status` is the provider's HTTP status, or a gateway status for transport failures.
    #[error("Failed to fetch weather data")]
    UpstreamWeather { status: u16, body: String },

    #[error("Forecast payload could not be read: {0}")]
    MalformedUpstreamPayload(String),

    #[error("Weather query {0} not found")]
    RecordNotFound(i64),

    #[error("Format '{0}' not supported")]
    UnsupportedFormat(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Upstream failures used to validate a user-supplied location are the caller's fault.
    pub fn into_validation(self) -> Self {
        match self {
            AppError::UpstreamWeather { body, .. } => AppError::UpstreamWeather { status: 400, body },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_validation_rewrites_upstream_status() {
        let err = AppError::UpstreamWeather {
            status: 404,
            body: "city not found".to_string(),
        }
        .into_validation();

        match err {
            AppError::UpstreamWeather { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_validation_keeps_other_errors() {
        let err = AppError::RecordNotFound(7).into_validation();
        assert!(matches!(err, AppError::RecordNotFound(7)));
    }
}
