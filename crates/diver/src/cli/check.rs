//! `check` command handler.

use anyhow::Context;
use diver::DiverSettings;
use diver_interface::ProviderClient;
use diver_models::{Credentials, RetryingClient, verify_provider};

/// Resolves the configured provider and sends a probe request.
#[tracing::instrument(skip_all)]
pub async fn handle_check_command(settings: &DiverSettings) -> anyhow::Result<()> {
    let credentials = Credentials::from_env();
    let available: Vec<String> = credentials.available().iter().map(|k| k.to_string()).collect();
    println!(
        "Credentials found for: {}",
        if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        }
    );

    let provider = settings
        .provider()
        .connect(&credentials)
        .context("No usable provider")?;
    println!(
        "Using {} ({})",
        provider.provider_name(),
        provider.model_name()
    );

    let client = RetryingClient::new(provider, settings.retry().clone());
    let reply = verify_provider(&client)
        .await
        .context("Provider rejected the probe request")?;
    println!("Provider OK: {}", reply.lines().next().unwrap_or_default());
    Ok(())
}
