// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{Result, ScannerError};
use crate::metrics::{self, ScanOutcome};
use crate::models::{AnalysisResult, RootStatus, ScanRequest};
use crate::vision::is_image_content_type;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use tracing::{debug, error, info, warn};

pub const ROOT_MESSAGE: &str = "Welcome to the Intelligent Scanner API";

/// Liveness probe. Never touches the analyzer or its configuration.
pub async fn root_handler() -> Json<RootStatus> {
    Json(RootStatus {
        status: "ok".to_string(),
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Prometheus exposition endpoint
pub async fn metrics_handler() -> Result<impl IntoResponse> {
    let body = metrics::gather_metrics()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

/// Map a multipart failure onto the error taxonomy. A body cut off by the
/// upload limit keeps its 413; everything else is a malformed request.
fn form_error(e: MultipartError) -> ScannerError {
    rejection_error(e.status(), e.body_text())
}

fn rejection_error(status: StatusCode, detail: String) -> ScannerError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ScannerError::PayloadTooLarge(detail)
    } else {
        ScannerError::InvalidRequest(detail)
    }
}

/// The uploaded image part before validation.
struct ImageUpload {
    content_type: Option<String>,
    bytes: Bytes,
}

/// Read the `image` and `barcode_data` fields, in any order. Unknown fields
/// are drained and ignored.
async fn read_scan_form(mut multipart: Multipart) -> Result<(ImageUpload, String)> {
    let mut image = None;
    let mut barcode = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(form_error)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(form_error)?;
                image = Some(ImageUpload { content_type, bytes });
            }
            Some("barcode_data") => {
                let text = field
                    .text()
                    .await
                    .map_err(form_error)?;
                barcode = Some(text);
            }
            other => {
                debug!("Ignoring unexpected form field: {:?}", other);
            }
        }
    }

    let image = image.ok_or_else(|| ScannerError::MissingField("image".to_string()))?;
    // An empty form value counts as absent.
    let barcode = barcode
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ScannerError::MissingField("barcode_data".to_string()))?;
    Ok((image, barcode))
}

/// Handler for `POST /api/v1/scan`.
///
/// Validates the upload, makes exactly one analyzer call, and echoes the
/// barcode back next to the analysis text.
pub async fn scan_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>> {
    let form = match multipart {
        Ok(multipart) => read_scan_form(multipart).await,
        Err(rejection) => Err(rejection_error(rejection.status(), rejection.body_text())),
    };
    let (image, barcode_text) = match form {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected scan request: {}", e);
            metrics::record_scan(ScanOutcome::InvalidInput);
            return Err(e);
        }
    };

    if !is_image_content_type(image.content_type.as_deref()) {
        warn!(
            "Rejected scan upload with content type {:?}",
            image.content_type
        );
        metrics::record_scan(ScanOutcome::InvalidInput);
        return Err(ScannerError::InvalidImage);
    }

    info!(
        "Received scan request: barcode={}, image_bytes={}, content_type={:?}",
        barcode_text,
        image.bytes.len(),
        image.content_type
    );
    metrics::record_image_size(image.bytes.len());

    let request = ScanRequest {
        image_bytes: image.bytes,
        content_type: image.content_type.unwrap_or_default(),
        barcode_text,
    };

    match state.analyzer.analyze(&request).await {
        Ok(analysis) => {
            metrics::record_scan(ScanOutcome::Ok);
            Ok(Json(AnalysisResult {
                barcode: request.barcode_text,
                analysis,
            }))
        }
        Err(e) => {
            error!("Error during product analysis: {}", e);
            metrics::record_scan(ScanOutcome::UpstreamError);
            Err(ScannerError::Analysis(e.to_string()))
        }
    }
}
