//! Retry with exponential backoff around any provider.

use async_trait::async_trait;
use derive_builder::Builder;
use derive_getters::Getters;
use diver_core::GenerationParams;
use diver_error::ProviderError;
use diver_interface::ProviderClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Retry configuration for provider calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    initial_backoff_ms: u64,
    /// Upper bound on any single delay, in milliseconds.
    max_backoff_ms: u64,
    /// Factor applied to the delay after each retry.
    backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
            max_backoff_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Creates a new builder for `RetryConfig`.
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// A config that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (zero-based), capped at the maximum.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry as i32);
        let millis = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(millis as u64)
    }
}

/// Wraps a provider and retries transient failures.
///
/// Quota, network and timeout failures are retried up to
/// [`RetryConfig::max_retries`] times. Anything else is returned at once.
#[derive(Debug, Clone)]
pub struct RetryingClient<P> {
    inner: P,
    config: RetryConfig,
}

impl<P: ProviderClient> RetryingClient<P> {
    /// Wraps `inner` with the given retry policy.
    pub fn new(inner: P, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// The retry policy.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[async_trait]
impl<P: ProviderClient> ProviderClient for RetryingClient<P> {
    #[instrument(skip(self, prompt, params), fields(provider = self.inner.provider_name(), max_retries = self.config.max_retries))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let mut retry = 0;

        loop {
            match self.inner.generate(prompt, params).await {
                Ok(text) => {
                    if retry > 0 {
                        debug!(retry, "Provider call succeeded after retry");
                    }
                    return Ok(text);
                }
                Err(err) => {
                    if !err.is_retryable() {
                        warn!(error = %err, "Provider error is not retryable, failing immediately");
                        return Err(err);
                    }
                    if retry >= self.config.max_retries {
                        warn!(retries = retry, error = %err, "All retry attempts exhausted");
                        return Err(err);
                    }

                    let backoff = self.config.backoff_for(retry);
                    debug!(retry, backoff_ms = backoff.as_millis() as u64, error = %err, "Retrying after failure");
                    sleep(backoff).await;
                    retry += 1;
                }
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
