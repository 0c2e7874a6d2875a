//! Story and session error types.

/// Specific error conditions for story turns and session mutations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryErrorKind {
    /// Operation not allowed in the current session state
    #[display("Invalid state: {_0}")]
    InvalidState(String),
    /// Character sheet failed validation
    #[display("Invalid character: {}", _0.join("; "))]
    InvalidCharacter(Vec<String>),
    /// Completion did not follow the choice contract.
    ///
    /// The raw text was still appended as a narrative-only entry at `index`.
    #[display("Unparseable completion stored at entry {index}: {reason}")]
    Parse {
        /// History index of the narrative-only entry
        index: usize,
        /// Why the completion was rejected
        reason: String,
    },
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use diver_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::InvalidState("no character".into()));
/// assert!(format!("{}", err).contains("no character"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an [`StoryErrorKind::InvalidState`] error.
    #[track_caller]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(StoryErrorKind::InvalidState(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryErrorKind {
        &self.kind
    }
}

/// Result alias for session and story operations.
pub type StoryResult<T> = std::result::Result<T, StoryError>;
