//! Test utilities for story engine tests.
//!
//! Provides a scripted provider and ready-made sessions.

use async_trait::async_trait;
use diver_core::{CharacterSheet, GenerationParams, SessionState, World};
use diver_error::{ProviderError, ProviderErrorKind};
use diver_interface::ProviderClient;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with this kind
    Fail(ProviderErrorKind),
}

/// Provider that pops scripted outcomes in order and records prompts.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedProvider {
    /// Creates a provider that replays `script`.
    pub fn new(script: impl IntoIterator<Item = MockResponse>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Number of generate calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Fail(kind)) => Err(ProviderError::new(kind)),
            None => Err(ProviderError::new(ProviderErrorKind::Malformed(
                "script exhausted".to_string(),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// A completion that follows the choice contract.
#[allow(dead_code)]
pub fn scene(narrative: &str, choices: &[&str]) -> MockResponse {
    let options: Vec<String> = choices
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c))
        .collect();
    MockResponse::Text(format!("{}\n\nDECISION_POINT\n{}", narrative, options.join("\n")))
}

/// A session with the sample cultivation character, ready to start.
#[allow(dead_code)]
pub fn ready_session() -> SessionState {
    let mut session = SessionState::new();
    session
        .create_character(CharacterSheet::sample(World::Cultivation))
        .unwrap();
    session.select_world(World::Cultivation).unwrap();
    session
}
