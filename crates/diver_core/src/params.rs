//! Generation parameters passed to every provider call.

use serde::{Deserialize, Serialize};

/// Sampling parameters for one completion request.
///
/// # Examples
///
/// ```
/// use diver_core::GenerationParams;
///
/// let params = GenerationParams::builder()
///     .max_tokens(10u32)
///     .temperature(0.1f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*params.max_tokens(), 10);
/// assert_eq!(*params.top_p(), Some(0.9));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct GenerationParams {
    /// Upper bound on generated tokens
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling cutoff, where the provider supports it
    top_p: Option<f32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            temperature: 0.7,
            top_p: Some(0.9),
        }
    }
}

impl GenerationParams {
    /// Returns a builder seeded with the defaults.
    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::default()
    }
}
