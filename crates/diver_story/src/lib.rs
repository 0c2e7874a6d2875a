//! Story turns for diver.
//!
//! [`StoryEngine::advance`] drives one turn: it validates the user's choice,
//! asks [`PromptAssembler`] for the prompt, calls the provider, splits the
//! completion with [`CompletionParser`], and appends the new scene to the
//! session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod metrics;
mod parser;
mod prompt;
mod templates;

pub use engine::{EngineConfig, EngineConfigBuilder, StoryEngine};
pub use metrics::StoryMetrics;
pub use parser::{CompletionParser, DECISION_MARKER, ParsedCompletion};
pub use prompt::{ContextWindow, ContextWindowBuilder, PromptAssembler};
pub use templates::WorldTemplates;
