// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    GEMINI_API_CALLS,
    GEMINI_API_DURATION,
    SCAN_IMAGE_BYTES,
    SCAN_REQUESTS_TOTAL,
};

/// Outcome label for a finished scan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Ok,
    InvalidInput,
    UpstreamError,
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOutcome::Ok => "ok",
            ScanOutcome::InvalidInput => "invalid_input",
            ScanOutcome::UpstreamError => "upstream_error",
        }
    }
}

/// Helper to record a finished scan
pub fn record_scan(outcome: ScanOutcome) {
    SCAN_REQUESTS_TOTAL
        .with_label_values(&[outcome.as_str()])
        .inc();
}

/// Helper to record the size of an accepted image
pub fn record_image_size(bytes: usize) {
    SCAN_IMAGE_BYTES.observe(bytes as f64);
}

/// Helper to record Gemini API call metrics
pub fn record_gemini_call(model: &str, status_code: &str, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, status_code])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
