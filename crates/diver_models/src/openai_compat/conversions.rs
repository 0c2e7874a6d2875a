//! Conversions between prompts and the OpenAI chat format.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse};
use diver_core::GenerationParams;
use diver_error::{ProviderError, ProviderErrorKind};

/// Wraps a prompt as a single user message.
pub fn to_chat_request(
    prompt: &str,
    params: &GenerationParams,
    model: &str,
) -> Result<ChatRequest, ProviderError> {
    let messages = vec![ChatMessage {
        role: "user".to_string(),
        content: Some(prompt.to_string()),
    }];

    ChatRequest::builder()
        .model(model)
        .messages(messages)
        .max_tokens(Some(*params.max_tokens()))
        .temperature(Some(*params.temperature()))
        .top_p(*params.top_p())
        .build()
        .map_err(|e| {
            ProviderError::new(ProviderErrorKind::Malformed(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Extracts the completion text from the first choice.
///
/// # Errors
///
/// `Malformed` if there are no choices or the first one has no text.
pub fn from_chat_response(response: &ChatResponse) -> Result<String, ProviderError> {
    let choice = response.choices.first().ok_or_else(|| {
        ProviderError::new(ProviderErrorKind::Malformed(
            "No choices in response".to_string(),
        ))
    })?;

    match choice.message.content.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ProviderError::new(ProviderErrorKind::Malformed(format!(
            "Empty completion (finish_reason: {})",
            choice.finish_reason.as_deref().unwrap_or("unknown")
        )))),
    }
}
