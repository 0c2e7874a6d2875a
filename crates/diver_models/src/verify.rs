//! Credential probe.

use diver_core::GenerationParams;
use diver_error::ProviderError;
use diver_interface::ProviderClient;
use tracing::{info, instrument, warn};

/// Sends a tiny generation to confirm the provider accepts our credential.
///
/// Returns the probe's reply on success.
#[instrument(skip(client), fields(provider = client.provider_name(), model = client.model_name()))]
pub async fn verify_provider<P: ProviderClient + ?Sized>(client: &P) -> Result<String, ProviderError> {
    let params = GenerationParams::builder()
        .max_tokens(10u32)
        .temperature(0.1f32)
        .top_p(None::<f32>)
        .build()
        .unwrap_or_default();

    match client.generate("Hello", &params).await {
        Ok(reply) => {
            info!("Provider verified");
            Ok(reply)
        }
        Err(e) => {
            warn!(error = %e, "Provider verification failed");
            Err(e)
        }
    }
}
