// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use crate::error::{Result, ScannerError};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_histogram_with_registry, CounterVec, Encoder, Histogram, HistogramOpts,
    HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // SCAN METRICS
    // ============================================================================

    /// Scan requests by outcome: ok, invalid_input, upstream_error
    pub static ref SCAN_REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("scan_requests_total", "Total number of scan requests"),
        &["outcome"],
        REGISTRY
    ).unwrap();

    /// Size of accepted product images
    pub static ref SCAN_IMAGE_BYTES: Histogram = register_histogram_with_registry!(
        HistogramOpts::new("scan_image_bytes", "Size of uploaded product images in bytes")
            .buckets(vec![16_384.0, 65_536.0, 262_144.0, 1_048_576.0, 4_194_304.0, 20_971_520.0]),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GEMINI API METRICS
    // ============================================================================

    /// Total Gemini API calls
    pub static ref GEMINI_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gemini_api_calls_total", "Total Gemini API calls"),
        &["model", "status_code"],
        REGISTRY
    ).unwrap();

    /// Gemini API call duration
    pub static ref GEMINI_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("gemini_api_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ScannerError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| ScannerError::Internal(format!("Metrics were not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        SCAN_REQUESTS_TOTAL.with_label_values(&["ok"]).inc();
        GEMINI_API_CALLS.with_label_values(&["gemini-1.5-flash", "200"]).inc();
        GEMINI_API_DURATION.with_label_values(&["gemini-1.5-flash"]).observe(0.5);
        SCAN_IMAGE_BYTES.observe(1024.0);

        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("scan_requests_total"));
        assert!(metrics.contains("gemini_api_calls_total"));
        assert!(metrics.contains("gemini_api_duration_seconds"));
        assert!(metrics.contains("scan_image_bytes"));
    }
}
