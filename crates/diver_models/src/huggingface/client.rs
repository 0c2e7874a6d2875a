//! HuggingFace Inference API client with model fallback.

use crate::ApiKey;
use crate::huggingface::{HuggingFaceParameters, HuggingFaceRequest, HuggingFaceResponse};
use crate::status::{decode_error, status_error, transport_error};
use async_trait::async_trait;
use diver_core::GenerationParams;
use diver_error::{ConfigError, ProviderError, ProviderErrorKind};
use diver_interface::ProviderClient;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default Inference API root; the model id is appended.
pub const HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co/models/";

/// Models tried in order until one produces text.
pub const HUGGINGFACE_DEFAULT_MODELS: [&str; 3] = [
    "mistralai/Mistral-7B-Instruct-v0.1",
    "microsoft/DialoGPT-large",
    "gpt2-large",
];

const PROVIDER: &str = "huggingface";

/// Client for the HuggingFace Inference API.
///
/// Each call walks the model list in order. Authentication failures abort
/// immediately since every model shares the same token; any other failure
/// moves on to the next model, and the last failure is returned if none
/// succeeds.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    token: ApiKey,
    models: Vec<String>,
    base_url: String,
}

impl HuggingFaceClient {
    /// Creates a client that tries `models` in order.
    ///
    /// # Errors
    ///
    /// Fails if `models` is empty or the HTTP client cannot be built.
    pub fn new(token: ApiKey, models: Vec<String>, timeout: Duration) -> Result<Self, ConfigError> {
        Self::with_base_url(token, models, HUGGINGFACE_BASE_URL.to_string(), timeout)
    }

    /// Creates a client against a custom API root.
    pub fn with_base_url(
        token: ApiKey,
        models: Vec<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if models.is_empty() {
            return Err(ConfigError::new("HuggingFace client needs at least one model"));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{}/", base_url)
        };
        debug!(models = ?models, url = %base_url, "Created HuggingFace client");
        Ok(Self {
            client,
            token,
            models,
            base_url,
        })
    }

    /// Models in fallback order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Builds the request body for a prompt.
    pub fn build_request(
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<HuggingFaceRequest, ProviderError> {
        let malformed = |e: String| {
            ProviderError::new(ProviderErrorKind::Malformed(format!(
                "Failed to build request: {}",
                e
            )))
        };
        let parameters = HuggingFaceParameters::builder()
            .max_new_tokens(*params.max_tokens())
            .temperature(*params.temperature())
            .top_p(*params.top_p())
            .build()
            .map_err(|e| malformed(e.to_string()))?;
        HuggingFaceRequest::builder()
            .inputs(prompt)
            .parameters(parameters)
            .build()
            .map_err(|e| malformed(e.to_string()))
    }

    async fn generate_with(
        &self,
        model: &str,
        request: &HuggingFaceRequest,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, model))
            .bearer_auth(self.token.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(status_error(PROVIDER, response).await);
        }

        let body: HuggingFaceResponse = response
            .json()
            .await
            .map_err(|e| decode_error(PROVIDER, e))?;

        body.text().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::Malformed(format!(
                "Model {} returned no text",
                model
            )))
        })
    }
}

#[async_trait]
impl ProviderClient for HuggingFaceClient {
    #[instrument(skip(self, prompt, params), fields(provider = PROVIDER, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let request = Self::build_request(prompt, params)?;
        let mut last_error = None;

        for model in &self.models {
            match self.generate_with(model, &request).await {
                Ok(text) => {
                    debug!(model = %model, chars = text.len(), "HuggingFace model succeeded");
                    return Ok(text);
                }
                Err(e) if matches!(e.kind(), ProviderErrorKind::Auth(_)) => return Err(e),
                Err(e) => {
                    warn!(model = %model, error = %e, "HuggingFace model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::new(ProviderErrorKind::Malformed(
                "No HuggingFace models configured".to_string(),
            ))
        }))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        self.models.first().map(String::as_str).unwrap_or_default()
    }
}
