use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;

/// Shown whenever an upload yields no analysable text.
pub const NO_TEXT_MESSAGE: &str = "Could not extract text. Try another file.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("No text extracted from {0}")]
    EmptyExtraction(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upload(e) => {
                let status = e.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "UPLOAD_ERROR"
                };
                (status, code, e.body_text())
            }
            AppError::UnsupportedFormat(filename) => {
                tracing::info!("Rejected unsupported upload: {filename}");
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_FORMAT",
                    NO_TEXT_MESSAGE.to_string(),
                )
            }
            AppError::EmptyExtraction(filename) => {
                tracing::info!("No text extracted from {filename}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EMPTY_EXTRACTION",
                    NO_TEXT_MESSAGE.to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PARSE_FAILURE",
                    "The document could not be read. Try another file.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
