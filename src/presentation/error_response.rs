// Mapping of application errors to JSON HTTP responses
use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidDateFormat { .. }
            | AppError::InvalidDateRange { .. }
            | AppError::InvalidCoordinateFormat(_)
            | AppError::UnsupportedFormat(_)
            | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamWeather { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::MalformedUpstreamPayload(_) => StatusCode::BAD_GATEWAY,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = match &self {
            AppError::UpstreamWeather { body, .. } => json!({
                "error": self.to_string(),
                "details": body,
            }),
            // Store and encoding failures stay in the logs
            AppError::Internal(_) => json!({"error": "Internal server error"}),
            _ => json!({"error": self.to_string()}),
        };

        (status, Json(body)).into_response()
    }
}
