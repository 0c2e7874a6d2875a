//! Tests for request building and response extraction across providers.

use diver_core::GenerationParams;
use diver_error::ProviderErrorKind;
use diver_models::{
    ChatResponse, GeminiClient, GeminiResponse, HuggingFaceClient, HuggingFaceResponse,
    classify_status, from_chat_response, to_chat_request,
};
use serde_json::json;

#[test]
fn test_openai_request_wraps_prompt_as_user_message() {
    let request = to_chat_request("Tell a story", &GenerationParams::default(), "gpt-3.5-turbo")
        .expect("request builds");
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Tell a story");
    assert_eq!(body["max_tokens"], 800);
    assert!(body["top_p"].is_number());
}

#[test]
fn test_openai_response_text_is_trimmed() {
    let response: ChatResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": "  The gate opens.\n"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 4}
    }))
    .unwrap();

    assert_eq!(from_chat_response(&response).unwrap(), "The gate opens.");
}

#[test]
fn test_openai_empty_completion_is_malformed() {
    let response: ChatResponse = serde_json::from_value(json!({
        "choices": [{"message": {"role": "assistant", "content": "   "}, "finish_reason": "length"}]
    }))
    .unwrap();
    let err = from_chat_response(&response).unwrap_err();
    assert!(matches!(err.kind(), ProviderErrorKind::Malformed(_)));

    let empty: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
    assert!(from_chat_response(&empty).is_err());
}

#[test]
fn test_gemini_request_uses_camel_case_generation_config() {
    let request = GeminiClient::build_request("Begin", &GenerationParams::default()).unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["contents"][0]["parts"][0]["text"], "Begin");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 800);
    assert!(body["generationConfig"]["topP"].is_number());
}

#[test]
fn test_gemini_text_joins_parts_of_first_candidate() {
    let response: GeminiResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "The river "}, {"text": "runs red."}]},
            "finishReason": "STOP"
        }]
    }))
    .unwrap();

    assert_eq!(GeminiClient::extract_text(&response).unwrap(), "The river runs red.");
}

#[test]
fn test_gemini_blocked_prompt_is_malformed() {
    let response: GeminiResponse = serde_json::from_value(json!({
        "promptFeedback": {"blockReason": "SAFETY"}
    }))
    .unwrap();

    let err = GeminiClient::extract_text(&response).unwrap_err();
    match err.kind() {
        ProviderErrorKind::Malformed(reason) => assert!(reason.contains("SAFETY")),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn test_huggingface_request_disables_full_text() {
    let request = HuggingFaceClient::build_request("Begin", &GenerationParams::default()).unwrap();
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["inputs"], "Begin");
    assert_eq!(body["parameters"]["max_new_tokens"], 800);
    assert_eq!(body["parameters"]["return_full_text"], false);
    assert_eq!(body["parameters"]["do_sample"], true);
}

#[test]
fn test_huggingface_response_accepts_list_or_object() {
    let list: HuggingFaceResponse =
        serde_json::from_value(json!([{"generated_text": "A list answer"}])).unwrap();
    let object: HuggingFaceResponse =
        serde_json::from_value(json!({"generated_text": "An object answer"})).unwrap();
    let empty: HuggingFaceResponse = serde_json::from_value(json!([])).unwrap();

    assert_eq!(list.text().as_deref(), Some("A list answer"));
    assert_eq!(object.text().as_deref(), Some("An object answer"));
    assert_eq!(empty.text(), None);
}

#[test]
fn test_status_classification() {
    assert!(matches!(classify_status(401, "x".into()), ProviderErrorKind::Auth(_)));
    assert!(matches!(classify_status(403, "x".into()), ProviderErrorKind::Auth(_)));
    assert!(matches!(classify_status(429, "x".into()), ProviderErrorKind::Quota(_)));
    assert_eq!(classify_status(408, String::new()), ProviderErrorKind::Timeout);
    assert!(matches!(classify_status(503, "x".into()), ProviderErrorKind::Network(_)));
    assert_eq!(
        classify_status(404, "no such model".into()),
        ProviderErrorKind::Api {
            status: 404,
            message: "no such model".into()
        }
    );
    assert!(classify_status(502, String::new()).is_retryable());
    assert!(!classify_status(400, String::new()).is_retryable());
}
