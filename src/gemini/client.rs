// Gemini API client for product image analysis
// Author: kelexine (https://github.com/kelexine)

use super::prompt::build_prompt;
use crate::analyzer::ProductAnalyzer;
use crate::config::GeminiConfig;
use crate::error::{Result, ScannerError};
use crate::models::gemini::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use crate::models::ScanRequest;
use crate::utils::logging::sanitize;
use crate::vision::{resolve_mime_type, validate_image_size};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Client for the public Gemini `generateContent` API.
///
/// One instance is built at startup and shared by every request. It holds no
/// mutable state; the `reqwest` pool handles connection reuse.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    sanitize_errors: bool,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is logged but does not fail construction: the
    /// server still starts and each scan reports the problem instead.
    pub fn new(config: &GeminiConfig, sanitize_errors: bool) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls();

        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| ScannerError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        if config.usable_api_key().is_some() {
            info!("Gemini API configured successfully (model: {})", config.model);
        } else {
            error!(
                "Failed to configure Gemini API. Is GOOGLE_API_KEY set? \
                 Scans will fail until a key is provided."
            );
        }

        Ok(Self {
            http_client,
            config: config.clone(),
            sanitize_errors,
        })
    }

    /// Whether a usable API key was configured.
    pub fn is_configured(&self) -> bool {
        self.config.usable_api_key().is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn scrub(&self, text: &str) -> String {
        if self.sanitize_errors {
            sanitize(text)
        } else {
            text.to_string()
        }
    }

    /// Call Gemini `generateContent` once. Errors are returned immediately;
    /// nothing is retried.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self.config.usable_api_key().ok_or(ScannerError::MissingApiKey)?;
        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.config.model);

        let started = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(request)
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                crate::metrics::record_gemini_call(
                    &self.config.model,
                    "transport_error",
                    started.elapsed().as_secs_f64(),
                );
                let message = self.scrub(&e.to_string());
                error!("Gemini API request failed: {}", message);
                return Err(ScannerError::GeminiApi(format!("HTTP error: {}", message)));
            }
        };

        let status = response.status();
        crate::metrics::record_gemini_call(
            &self.config.model,
            status.as_str(),
            started.elapsed().as_secs_f64(),
        );

        let response_text = response
            .text()
            .await
            .map_err(|e| ScannerError::GeminiApi(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let detail = Self::extract_error_message(&response_text).unwrap_or(response_text);
            let detail = self.scrub(&detail);
            error!("Gemini API error: HTTP {} - {}", status, detail);
            return Err(ScannerError::GeminiApi(format!("HTTP {}: {}", status, detail)));
        }

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            ScannerError::GeminiApi(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.status)
    }

    /// Build the single-turn request carrying the prompt and the image.
    fn build_request(scan: &ScanRequest) -> GenerateContentRequest {
        let mime_type = resolve_mime_type(&scan.content_type, &scan.image_bytes);
        let data = base64::engine::general_purpose::STANDARD.encode(&scan.image_bytes);

        GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(build_prompt(&scan.barcode_text)),
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data,
                    },
                },
            ])],
        }
    }

    /// Pull the answer text out of a response, explaining why when there is none.
    fn response_text(response: &GenerateContentResponse) -> Result<String> {
        if let Some(text) = response.text() {
            return Ok(text);
        }

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(ScannerError::GeminiApi(format!("Prompt was blocked: {}", reason)));
        }

        let finish_reason = response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
            .unwrap_or("no candidates returned");
        Err(ScannerError::GeminiApi(format!(
            "Response contained no text (finish reason: {})",
            finish_reason
        )))
    }
}

#[async_trait]
impl ProductAnalyzer for GeminiClient {
    async fn analyze(&self, scan: &ScanRequest) -> Result<String> {
        validate_image_size(scan.image_bytes.len())?;

        let request = Self::build_request(scan);
        let response = self.generate_content(&request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Self::response_text(&response)
    }
}
