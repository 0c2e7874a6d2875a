//! Mapping HTTP outcomes onto provider error kinds.

use diver_error::{ProviderError, ProviderErrorKind};
use tracing::error;

/// Classifies a non-success HTTP status.
///
/// # Examples
///
/// ```
/// use diver_error::ProviderErrorKind;
/// use diver_models::classify_status;
///
/// assert!(matches!(classify_status(401, "bad key".into()), ProviderErrorKind::Auth(_)));
/// assert!(matches!(classify_status(429, "slow down".into()), ProviderErrorKind::Quota(_)));
/// assert_eq!(classify_status(504, String::new()), ProviderErrorKind::Timeout);
/// ```
pub fn classify_status(status: u16, message: String) -> ProviderErrorKind {
    match status {
        401 | 403 => ProviderErrorKind::Auth(message),
        429 => ProviderErrorKind::Quota(message),
        408 | 504 => ProviderErrorKind::Timeout,
        500..=599 => ProviderErrorKind::Network(format!("HTTP {}: {}", status, message)),
        _ => ProviderErrorKind::Api { status, message },
    }
}

/// Classifies a transport-level reqwest failure.
pub(crate) fn transport_error(provider: &'static str, err: reqwest::Error) -> ProviderError {
    error!(provider, error = ?err, "HTTP request failed");
    if err.is_timeout() {
        ProviderError::new(ProviderErrorKind::Timeout)
    } else {
        ProviderError::new(ProviderErrorKind::Network(format!("Request failed: {}", err)))
    }
}

/// Turns a non-success response into a provider error, consuming the body.
pub(crate) async fn status_error(
    provider: &'static str,
    response: reqwest::Response,
) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, error = %body, "API error");
    ProviderError::new(classify_status(status.as_u16(), body))
}

/// Wraps a body decoding failure.
pub(crate) fn decode_error(provider: &'static str, err: reqwest::Error) -> ProviderError {
    error!(provider, error = ?err, "Failed to parse response");
    ProviderError::new(ProviderErrorKind::Malformed(format!(
        "Failed to parse JSON: {}",
        err
    )))
}
