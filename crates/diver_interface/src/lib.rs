//! Trait definitions for the diver interactive fiction engine.
//!
//! [`ProviderClient`] is the seam between the story engine and whichever LLM
//! backend the user configured.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod provider;

pub use provider::ProviderClient;
