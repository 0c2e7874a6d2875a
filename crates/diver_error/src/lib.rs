//! Error types for the diver interactive fiction engine.
//!
//! Every error records the source line and file where it was created. The
//! domain errors are aggregated into [`DiverError`], which callers match on
//! through [`DiverError::kind`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod provider;
mod story;

pub use config::ConfigError;
pub use provider::{ProviderError, ProviderErrorKind};
pub use story::{StoryError, StoryErrorKind, StoryResult};

/// Crate-level error variants.
#[derive(Debug, Clone, derive_more::From, derive_more::Display)]
pub enum DiverErrorKind {
    /// Settings or credential resolution failed
    #[display("{_0}")]
    Config(ConfigError),
    /// The LLM provider call failed
    #[display("{_0}")]
    Provider(ProviderError),
    /// A story or session precondition was violated
    #[display("{_0}")]
    Story(StoryError),
}

/// Diver error with kind discrimination.
#[derive(Debug, Clone, derive_more::Display)]
#[display("Diver Error: {_0}")]
pub struct DiverError(Box<DiverErrorKind>);

impl DiverError {
    /// Create a new error from a kind.
    pub fn new(kind: DiverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DiverErrorKind {
        &self.0
    }

    /// Returns the provider failure, if that is what this error wraps.
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self.kind() {
            DiverErrorKind::Provider(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the story failure, if that is what this error wraps.
    pub fn as_story(&self) -> Option<&StoryError> {
        match self.kind() {
            DiverErrorKind::Story(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for DiverError {}

impl<T> From<T> for DiverError
where
    T: Into<DiverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for diver operations.
pub type DiverResult<T> = std::result::Result<T, DiverError>;
