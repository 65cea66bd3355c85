// HTTP response utilities for exported bodies
use crate::error::{AppError, AppResult};
use crate::infrastructure::export::ExportedBody;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

/// Build a 200 response carrying an export with its content type and length
pub fn export_response(exported: ExportedBody) -> AppResult<Response<Body>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(exported.content_type))
        .header(header::CONTENT_LENGTH, exported.body.len())
        .body(Body::from(exported.body))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Response build error: {e}")))
}
