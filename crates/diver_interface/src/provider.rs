//! Uniform completion interface over LLM backends.

use async_trait::async_trait;
use diver_core::GenerationParams;
use diver_error::ProviderError;
use std::sync::Arc;

/// Turns a prompt into completion text.
///
/// Implementations own their credentials and wire format. They report
/// failures as a typed [`ProviderError`] and never return an empty string:
/// a response without text is a `Malformed` failure.
///
/// # Example
///
/// ```rust,ignore
/// use diver_interface::ProviderClient;
///
/// async fn narrate(client: &impl ProviderClient, prompt: &str) {
///     let text = client.generate(prompt, &Default::default()).await?;
///     println!("{} says: {}", client.provider_name(), text);
/// }
/// ```
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Generates a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// Provider name for logging and metrics.
    fn provider_name(&self) -> &'static str;

    /// Model identifier currently in use.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<P: ProviderClient + ?Sized> ProviderClient for Arc<P> {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        (**self).generate(prompt, params).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<P: ProviderClient + ?Sized> ProviderClient for Box<P> {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        (**self).generate(prompt, params).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
