//! Generic client for OpenAI-compatible APIs.

use crate::openai_compat::{ChatResponse, conversions};
use crate::status::{decode_error, status_error, transport_error};
use crate::ApiKey;
use async_trait::async_trait;
use diver_core::GenerationParams;
use diver_error::{ConfigError, ProviderError};
use diver_interface::ProviderClient;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default chat completions endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for OpenAI.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Generic client for any OpenAI-compatible API.
///
/// Handles the chat completions format used by OpenAI and the many servers
/// that mirror it.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
    provider_name: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Model identifier
    /// * `base_url` - Full chat completions URL
    /// * `provider_name` - Name of the provider (for logging/tracing)
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip_all, fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: ApiKey,
        model: String,
        base_url: String,
        provider_name: &'static str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            provider = provider_name,
            model = %model,
            url = %base_url,
            "Created OpenAI-compatible client"
        );

        Ok(Self {
            client,
            api_key,
            model,
            base_url,
            provider_name,
        })
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProviderClient for OpenAICompatibleClient {
    #[instrument(skip(self, prompt, params), fields(provider = self.provider_name, model = %self.model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let chat_request = conversions::to_chat_request(prompt, params, &self.model)?;

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(self.api_key.expose())
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| transport_error(self.provider_name, e))?;

        if !response.status().is_success() {
            return Err(status_error(self.provider_name, response).await);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| decode_error(self.provider_name, e))?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            completion_tokens = ?chat_response.usage.as_ref().and_then(|u| u.completion_tokens),
            "Received response"
        );

        conversions::from_chat_response(&chat_response)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
