use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

pub const INVALID_PDF_MESSAGE: &str = "Please upload a valid PDF file.";
pub const COMPRESSION_ERROR_MESSAGE: &str = "An error occurred during compression.";

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::InvalidInput(ref msg) => {
                warn!("Invalid input: {}", msg);
                (StatusCode::BAD_REQUEST, INVALID_PDF_MESSAGE)
            }
            ApplicationError::PayloadTooLarge => {
                warn!("Upload exceeds the configured size limit");
                (StatusCode::PAYLOAD_TOO_LARGE, "File too large")
            }
            ApplicationError::CompressionFailed(ref msg) => {
                error!("Compression failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, COMPRESSION_ERROR_MESSAGE)
            }
            ApplicationError::MetadataEditFailed(ref msg) => {
                error!("Metadata removal failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, COMPRESSION_ERROR_MESSAGE)
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, COMPRESSION_ERROR_MESSAGE)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
