// Error types for the intelliscan relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Uploaded file is not an image.")]
    InvalidImage,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("An error occurred during analysis: {0}")]
    Analysis(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Gemini API key is not configured (set GOOGLE_API_KEY)")]
    MissingApiKey,

    #[error("Image size {size} bytes exceeds maximum of {max} bytes")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScannerError {
    /// HTTP status this error maps to when it reaches a handler boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScannerError::InvalidImage | ScannerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ScannerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ScannerError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert ScannerError to HTTP responses for Axum
impl IntoResponse for ScannerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "detail": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ScannerError>;
