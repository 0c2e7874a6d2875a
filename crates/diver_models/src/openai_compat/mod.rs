//! Generic OpenAI-compatible API client.
//!
//! Works against any endpoint that follows the OpenAI chat completions format.

mod client;
mod conversions;
mod dto;

pub use client::{OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAICompatibleClient};
pub use conversions::{from_chat_response, to_chat_request};
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage};
