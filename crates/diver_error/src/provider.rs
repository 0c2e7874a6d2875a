//! Provider error types and retry classification.

/// Failure conditions reported by an LLM provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Credential missing, invalid, or lacking permission (HTTP 401/403)
    #[display("Authentication failed: {_0}")]
    Auth(String),
    /// Quota exhausted or rate limited (HTTP 429)
    #[display("Quota exceeded: {_0}")]
    Quota(String),
    /// Transport failure or provider-side outage
    #[display("Network error: {_0}")]
    Network(String),
    /// The request did not complete within the client timeout
    #[display("Request timed out")]
    Timeout,
    /// The provider answered, but without usable completion text
    #[display("Malformed response: {_0}")]
    Malformed(String),
    /// Any other non-success status
    #[display("HTTP {status} error: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
}

impl ProviderErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Quota, network and timeout failures are transient. Auth, malformed
    /// responses and other API rejections fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderErrorKind::Quota(_) | ProviderErrorKind::Network(_) | ProviderErrorKind::Timeout
        )
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use diver_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Quota("daily limit".into()));
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("daily limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
