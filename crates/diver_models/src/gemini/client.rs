//! Gemini REST client.

use crate::ApiKey;
use crate::gemini::{
    GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig,
};
use crate::status::{decode_error, status_error, transport_error};
use async_trait::async_trait;
use diver_core::GenerationParams;
use diver_error::{ConfigError, ProviderError, ProviderErrorKind};
use diver_interface::ProviderClient;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Gemini API root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

const PROVIDER: &str = "gemini";

/// Client for Google's Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against the public Gemini endpoint.
    pub fn new(api_key: ApiKey, model: String, timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, model, GEMINI_BASE_URL.to_string(), timeout)
    }

    /// Creates a client against a custom API root.
    pub fn with_base_url(
        api_key: ApiKey,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        debug!(model = %model, url = %base_url, "Created Gemini client");
        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Builds the request body for a prompt.
    pub fn build_request(
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GeminiRequest, ProviderError> {
        let generation_config = GenerationConfig::builder()
            .max_output_tokens(*params.max_tokens())
            .temperature(*params.temperature())
            .top_p(*params.top_p())
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::Malformed(format!(
                    "Failed to build generation config: {}",
                    e
                )))
            })?;

        Ok(GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config,
        })
    }

    /// Extracts completion text, explaining why when there is none.
    pub fn extract_text(response: &GeminiResponse) -> Result<String, ProviderError> {
        if let Some(text) = response.text() {
            return Ok(text);
        }
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .map(|r| format!("prompt blocked: {}", r))
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .map(|r| format!("no text (finish_reason: {})", r))
            })
            .unwrap_or_else(|| "no candidates in response".to_string());
        warn!(provider = PROVIDER, %reason, "Empty Gemini completion");
        Err(ProviderError::new(ProviderErrorKind::Malformed(reason)))
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    #[instrument(skip(self, prompt, params), fields(provider = PROVIDER, model = %self.model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let request = Self::build_request(prompt, params)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(status_error(PROVIDER, response).await);
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| decode_error(PROVIDER, e))?;

        debug!(candidates = body.candidates.len(), "Received Gemini response");
        Self::extract_text(&body)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
