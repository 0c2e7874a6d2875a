//! Tests for provider selection and credential handling.

use diver_core::World;
use diver_interface::ProviderClient;
use diver_models::{ApiKey, Credentials, ProviderConfig, ProviderKind};
use std::str::FromStr;

#[test]
fn test_api_key_never_prints() {
    let key = ApiKey::new("sk-secret-123");
    assert_eq!(format!("{key}"), "***");
    assert!(!format!("{key:?}").contains("secret"));
    assert_eq!(key.expose(), "sk-secret-123");
}

#[test]
fn test_provider_kind_names() {
    assert_eq!(ProviderKind::from_str("huggingface").unwrap(), ProviderKind::HuggingFace);
    assert_eq!(ProviderKind::from_str("openai").unwrap(), ProviderKind::OpenAI);
    assert_eq!(ProviderKind::Gemini.to_string(), "gemini");
    assert_eq!(ProviderKind::Demo.env_var(), None);
    assert_eq!(ProviderKind::HuggingFace.env_var(), Some("HUGGINGFACE_TOKEN"));
}

#[test]
fn test_resolve_prefers_configured_provider_with_key() {
    let credentials = Credentials::new()
        .with(ProviderKind::Gemini, ApiKey::new("g"))
        .with(ProviderKind::OpenAI, ApiKey::new("o"));

    assert_eq!(
        credentials.resolve(Some(ProviderKind::OpenAI)).unwrap(),
        ProviderKind::OpenAI
    );
}

#[test]
fn test_resolve_falls_back_in_order() {
    let credentials = Credentials::new()
        .with(ProviderKind::OpenAI, ApiKey::new("o"))
        .with(ProviderKind::HuggingFace, ApiKey::new("h"));

    assert_eq!(credentials.resolve(None).unwrap(), ProviderKind::HuggingFace);
    assert_eq!(
        credentials.resolve(Some(ProviderKind::Gemini)).unwrap(),
        ProviderKind::HuggingFace
    );
}

#[test]
fn test_resolve_without_credentials_fails_except_demo() {
    let credentials = Credentials::new();
    let err = credentials.resolve(None).unwrap_err();
    assert!(err.message.contains("No provider credentials"));
    assert_eq!(
        credentials.resolve(Some(ProviderKind::Demo)).unwrap(),
        ProviderKind::Demo
    );
}

#[test]
fn test_provider_config_deserializes_with_defaults() {
    let config: ProviderConfig = serde_json::from_str(r#"{"kind": "gemini"}"#).unwrap();
    assert_eq!(*config.kind(), Some(ProviderKind::Gemini));
    assert_eq!(*config.timeout_secs(), 30);
    assert_eq!(config.huggingface_models().len(), 3);
    assert_eq!(*config.model(), None);
}

#[test]
fn test_connect_builds_requested_client() {
    let credentials = Credentials::new().with(ProviderKind::Gemini, ApiKey::new("g"));

    let gemini = ProviderConfig::default().connect(&credentials).unwrap();
    assert_eq!(gemini.kind(), ProviderKind::Gemini);
    assert_eq!(gemini.model_name(), "gemini-1.5-flash");

    let demo = ProviderConfig::for_kind(ProviderKind::Demo)
        .connect(&Credentials::new())
        .unwrap();
    assert_eq!(demo.provider_name(), "demo");
}

#[test]
fn test_connect_honours_model_override_for_huggingface() {
    let credentials = Credentials::new().with(ProviderKind::HuggingFace, ApiKey::new("h"));
    let config: ProviderConfig =
        serde_json::from_str(r#"{"kind": "huggingface", "model": "gpt2"}"#).unwrap();

    let provider = config.connect(&credentials).unwrap();
    assert_eq!(provider.model_name(), "gpt2");
}

#[test]
fn test_world_labels_are_distinct() {
    let labels: std::collections::HashSet<_> = World::all().map(|w| w.label()).collect();
    assert_eq!(labels.len(), 5);
}
