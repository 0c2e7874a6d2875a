//! LLM provider integrations for diver.
//!
//! Every backend implements [`ProviderClient`](diver_interface::ProviderClient):
//!
//! - [`GeminiClient`] for Google Gemini
//! - [`HuggingFaceClient`] for the HuggingFace Inference API, with model fallback
//! - [`OpenAICompatibleClient`] for OpenAI-style chat completions
//! - [`DemoClient`] for offline play
//!
//! [`ProviderConfig::connect`] picks one from settings and [`Credentials`];
//! [`RetryingClient`] adds exponential backoff for transient failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod demo;
mod gemini;
mod huggingface;
mod openai_compat;
mod retry;
mod status;
mod verify;

pub use config::{AnyProvider, ApiKey, Credentials, ProviderConfig, ProviderKind};
pub use demo::DemoClient;
pub use gemini::{
    GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiCandidate, GeminiClient, GeminiContent,
    GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig, GenerationConfigBuilder,
    PromptFeedback,
};
pub use huggingface::{
    HUGGINGFACE_BASE_URL, HUGGINGFACE_DEFAULT_MODELS, HuggingFaceClient, HuggingFaceGeneration,
    HuggingFaceParameters, HuggingFaceParametersBuilder, HuggingFaceRequest,
    HuggingFaceRequestBuilder, HuggingFaceResponse,
};
pub use openai_compat::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAICompatibleClient, from_chat_response,
    to_chat_request,
};
pub use retry::{RetryConfig, RetryConfigBuilder, RetryingClient};
pub use status::classify_status;
pub use verify::verify_provider;
