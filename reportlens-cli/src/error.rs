//! HTTP error mapping with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reportlens_core::ReportError;
use serde::Serialize;

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Report(err) => match err {
                ReportError::MissingPage => StatusCode::UNPROCESSABLE_ENTITY,
                ReportError::EmptyUpload => StatusCode::BAD_REQUEST,
                ReportError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                ReportError::UnsupportedExtension { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ReportError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ReportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "API internal error");
            "An internal error occurred".to_string()
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
