// Shared helpers for integration tests
// Author: kelexine (https://github.com/kelexine)
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use http_body_util::BodyExt;
use intelliscan::analyzer::ProductAnalyzer;
use intelliscan::error::{Result, ScannerError};
use intelliscan::models::ScanRequest;
use std::sync::Mutex;

pub const BOUNDARY: &str = "intelliscan-test-boundary-7MA4YWxkTrZu0gW";

/// Smallest valid PNG (1x1, transparent).
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Analyzer double that records every call and returns a canned outcome.
pub struct SpyAnalyzer {
    calls: Mutex<Vec<ScanRequest>>,
    outcome: std::result::Result<String, String>,
}

impl SpyAnalyzer {
    pub fn returning(analysis: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(analysis.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ScanRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductAnalyzer for SpyAnalyzer {
    async fn analyze(&self, request: &ScanRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.outcome
            .clone()
            .map_err(ScannerError::GeminiApi)
    }
}

/// One part of a `multipart/form-data` body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn image_part<'a>(content_type: &'a str, data: &'a [u8]) -> FormPart<'a> {
    FormPart {
        name: "image",
        filename: Some("product.png"),
        content_type: Some(content_type),
        data,
    }
}

pub fn barcode_part(barcode: &str) -> FormPart<'_> {
    FormPart {
        name: "barcode_data",
        filename: None,
        content_type: None,
        data: barcode.as_bytes(),
    }
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{}\"", filename));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn scan_request(parts: &[FormPart<'_>]) -> Request<Body> {
    let body = multipart_body(parts);
    Request::builder()
        .method("POST")
        .uri("/api/v1/scan")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

/// Same form as [`scan_request`], sent as a chunked stream with no
/// `Content-Length`.
pub fn streamed_scan_request(parts: &[FormPart<'_>], chunk_size: usize) -> Request<Body> {
    let chunks: Vec<std::io::Result<Vec<u8>>> = multipart_body(parts)
        .chunks(chunk_size)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();
    Request::builder()
        .method("POST")
        .uri("/api/v1/scan")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from_stream(futures::stream::iter(chunks)))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
