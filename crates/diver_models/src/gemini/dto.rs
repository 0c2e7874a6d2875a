//! Gemini `generateContent` request and response shapes.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single text part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text payload
    #[serde(default)]
    pub text: Option<String>,
}

/// A content block with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Sampling configuration sent with each request.
#[derive(Debug, Clone, Serialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerationConfig {
    /// Maximum tokens in the completion
    max_output_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling cutoff
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl GenerationConfig {
    /// Creates a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation contents
    pub contents: Vec<GeminiContent>,
    /// Sampling configuration
    pub generation_config: GenerationConfig,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Candidate content; absent when blocked
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt itself, present when it was blocked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Prompt feedback
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
