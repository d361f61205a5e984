// Product analysis abstraction
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::models::ScanRequest;
use async_trait::async_trait;

/// Anything that can turn a product photo and its barcode into analysis text.
///
/// The HTTP layer only talks to this trait, so the Gemini client can be
/// swapped for a fake in tests. Implementations must not retry or cache:
/// every call is one upstream request.
#[async_trait]
pub trait ProductAnalyzer: Send + Sync {
    async fn analyze(&self, request: &ScanRequest) -> Result<String>;
}
