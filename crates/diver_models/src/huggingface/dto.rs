//! HuggingFace Inference API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// HuggingFace API request body.
#[derive(Debug, Clone, Serialize, Getters, Builder)]
#[builder(setter(into))]
pub struct HuggingFaceRequest {
    /// Input text
    inputs: String,
    /// Generation parameters
    parameters: HuggingFaceParameters,
}

impl HuggingFaceRequest {
    /// Creates a new builder for `HuggingFaceRequest`.
    pub fn builder() -> HuggingFaceRequestBuilder {
        HuggingFaceRequestBuilder::default()
    }
}

/// HuggingFace generation parameters.
#[derive(Debug, Clone, Getters, Builder, Serialize)]
#[builder(setter(into))]
pub struct HuggingFaceParameters {
    /// Maximum new tokens to generate
    max_new_tokens: u32,
    /// Temperature for sampling
    temperature: f32,
    /// Top-p sampling
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    /// Sample instead of greedy decoding
    #[builder(default = "true")]
    do_sample: bool,
    /// Echo the prompt back in the output
    #[builder(default = "false")]
    return_full_text: bool,
}

impl HuggingFaceParameters {
    /// Creates a new builder for `HuggingFaceParameters`.
    pub fn builder() -> HuggingFaceParametersBuilder {
        HuggingFaceParametersBuilder::default()
    }
}

/// One generated sequence.
#[derive(Debug, Clone, Getters, Deserialize)]
pub struct HuggingFaceGeneration {
    /// Generated text
    #[serde(default)]
    generated_text: String,
}

/// HuggingFace API response; text-generation models answer with a list,
/// some others with a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HuggingFaceResponse {
    /// `[{"generated_text": ...}, ...]`
    Many(Vec<HuggingFaceGeneration>),
    /// `{"generated_text": ...}`
    One(HuggingFaceGeneration),
}

impl HuggingFaceResponse {
    /// Trimmed text of the first generation, if non-empty.
    pub fn text(&self) -> Option<String> {
        let generation = match self {
            Self::Many(items) => items.first()?,
            Self::One(item) => item,
        };
        let trimmed = generation.generated_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
