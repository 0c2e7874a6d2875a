//! Core data types for the diver interactive fiction engine.
//!
//! A story session is a [`SessionState`]: one [`CharacterSheet`], one
//! [`World`], and a [`StoryHistory`] of [`DecisionPoint`]s in the order they
//! were generated.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod decision;
mod observability;
mod params;
mod session;
mod world;

pub use character::{CharacterSheet, CharacterSheetBuilder, CharacterSheetBuilderError};
pub use decision::{DecisionPoint, StoryHistory};
pub use observability::{MetricsHandle, init_metrics, shutdown_metrics};
pub use params::{GenerationParams, GenerationParamsBuilder, GenerationParamsBuilderError};
pub use session::SessionState;
pub use world::World;
