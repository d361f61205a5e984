// Request-scoped scan types
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One uploaded product photo plus the barcode read from it.
///
/// Built per HTTP call and dropped when the call completes.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub image_bytes: Bytes,
    /// Content type declared by the client for the image part.
    pub content_type: String,
    pub barcode_text: String,
}

/// Success body of `POST /api/v1/scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The submitted barcode text, untouched.
    pub barcode: String,
    /// Model output, untouched.
    pub analysis: String,
}

/// Body of the root liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootStatus {
    pub status: String,
    pub message: String,
}
