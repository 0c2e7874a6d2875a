//! Google Gemini integration over the REST API.

mod client;
mod dto;

pub use client::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiClient};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig,
    GenerationConfigBuilder, PromptFeedback,
};
