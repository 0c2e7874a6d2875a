//! Provider selection, credentials and client construction.

use crate::demo::DemoClient;
use crate::gemini::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiClient};
use crate::huggingface::{HUGGINGFACE_BASE_URL, HUGGINGFACE_DEFAULT_MODELS, HuggingFaceClient};
use crate::openai_compat::{OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAICompatibleClient};
use async_trait::async_trait;
use derive_getters::Getters;
use diver_core::GenerationParams;
use diver_error::{ConfigError, ProviderError};
use diver_interface::ProviderClient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Supported completion backends.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    Gemini,
    /// HuggingFace Inference API
    #[serde(rename = "huggingface")]
    #[strum(serialize = "huggingface")]
    HuggingFace,
    /// OpenAI chat completions
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAI,
    /// Canned offline scenes
    Demo,
}

impl ProviderKind {
    /// Environment variable holding this provider's credential.
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::HuggingFace => Some("HUGGINGFACE_TOKEN"),
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Demo => None,
        }
    }

    /// Providers that need a key, in fallback order.
    pub fn keyed() -> [ProviderKind; 3] {
        [Self::Gemini, Self::HuggingFace, Self::OpenAI]
    }
}

/// A secret credential. Never printed and never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Credentials available to this process, keyed by provider.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    keys: BTreeMap<ProviderKind, ApiKey>,
}

impl Credentials {
    /// No credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every known key variable from the environment; blank values are ignored.
    pub fn from_env() -> Self {
        let mut credentials = Self::new();
        for kind in ProviderKind::keyed() {
            let Some(var) = kind.env_var() else { continue };
            if let Ok(value) = std::env::var(var)
                && !value.trim().is_empty()
            {
                debug!(provider = %kind, var, "Found provider credential");
                credentials = credentials.with(kind, ApiKey::new(value.trim()));
            }
        }
        credentials
    }

    /// Adds or replaces a key.
    pub fn with(mut self, kind: ProviderKind, key: ApiKey) -> Self {
        self.keys.insert(kind, key);
        self
    }

    /// Key for `kind`, if present.
    pub fn get(&self, kind: ProviderKind) -> Option<&ApiKey> {
        self.keys.get(&kind)
    }

    /// Providers with a key, in fallback order.
    pub fn available(&self) -> Vec<ProviderKind> {
        ProviderKind::keyed()
            .into_iter()
            .filter(|k| self.keys.contains_key(k))
            .collect()
    }

    /// Picks the provider to use.
    ///
    /// `preferred` wins when it is [`ProviderKind::Demo`] or has a key.
    /// Otherwise the first available of gemini, huggingface, openai is used.
    ///
    /// # Errors
    ///
    /// Fails when no keyed provider is available.
    pub fn resolve(&self, preferred: Option<ProviderKind>) -> Result<ProviderKind, ConfigError> {
        if let Some(kind) = preferred {
            if kind == ProviderKind::Demo || self.keys.contains_key(&kind) {
                return Ok(kind);
            }
            info!(preferred = %kind, "Preferred provider has no credential, falling back");
        }
        self.available().into_iter().next().ok_or_else(|| {
            ConfigError::new(
                "No provider credentials found; set GEMINI_API_KEY, HUGGINGFACE_TOKEN or OPENAI_API_KEY, or use the demo provider",
            )
        })
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Provider section of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ProviderConfig {
    /// Preferred provider; `None` picks the first with a credential.
    kind: Option<ProviderKind>,
    /// Model override; each provider has its own default.
    model: Option<String>,
    /// Endpoint override.
    base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// HuggingFace models tried in order.
    huggingface_models: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            huggingface_models: HUGGINGFACE_DEFAULT_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl ProviderConfig {
    /// Config that prefers `kind`.
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Overrides the preferred provider.
    pub fn with_kind(mut self, kind: Option<ProviderKind>) -> Self {
        if kind.is_some() {
            self.kind = kind;
        }
        self
    }

    /// Resolves the provider and builds its client.
    ///
    /// # Errors
    ///
    /// Fails when no provider can be resolved or its client cannot be built.
    #[instrument(skip(self, credentials), fields(preferred = ?self.kind))]
    pub fn connect(&self, credentials: &Credentials) -> Result<AnyProvider, ConfigError> {
        let kind = credentials.resolve(self.kind)?;
        let timeout = Duration::from_secs(self.timeout_secs);
        let key = || {
            credentials
                .get(kind)
                .cloned()
                .ok_or_else(|| ConfigError::new(format!("Missing credential for {}", kind)))
        };

        let provider = match kind {
            ProviderKind::Gemini => AnyProvider::Gemini(GeminiClient::with_base_url(
                key()?,
                self.model.clone().unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
                self.base_url.clone().unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
                timeout,
            )?),
            ProviderKind::HuggingFace => {
                let models = match &self.model {
                    Some(model) => vec![model.clone()],
                    None => self.huggingface_models.clone(),
                };
                AnyProvider::HuggingFace(HuggingFaceClient::with_base_url(
                    key()?,
                    models,
                    self.base_url.clone().unwrap_or_else(|| HUGGINGFACE_BASE_URL.to_string()),
                    timeout,
                )?)
            }
            ProviderKind::OpenAI => AnyProvider::OpenAI(OpenAICompatibleClient::new(
                key()?,
                self.model.clone().unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
                self.base_url.clone().unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
                "openai",
                timeout,
            )?),
            ProviderKind::Demo => AnyProvider::Demo(DemoClient::new()),
        };

        info!(provider = provider.provider_name(), model = provider.model_name(), "Provider ready");
        Ok(provider)
    }
}

/// Any configured provider, dispatched statically.
#[derive(Debug)]
pub enum AnyProvider {
    /// Google Gemini
    Gemini(GeminiClient),
    /// HuggingFace Inference API
    HuggingFace(HuggingFaceClient),
    /// OpenAI chat completions
    OpenAI(OpenAICompatibleClient),
    /// Offline demo scenes
    Demo(DemoClient),
}

impl AnyProvider {
    /// Which backend this is.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Gemini(_) => ProviderKind::Gemini,
            Self::HuggingFace(_) => ProviderKind::HuggingFace,
            Self::OpenAI(_) => ProviderKind::OpenAI,
            Self::Demo(_) => ProviderKind::Demo,
        }
    }
}

#[async_trait]
impl ProviderClient for AnyProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        match self {
            Self::Gemini(c) => c.generate(prompt, params).await,
            Self::HuggingFace(c) => c.generate(prompt, params).await,
            Self::OpenAI(c) => c.generate(prompt, params).await,
            Self::Demo(c) => c.generate(prompt, params).await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Self::Gemini(c) => c.provider_name(),
            Self::HuggingFace(c) => c.provider_name(),
            Self::OpenAI(c) => c.provider_name(),
            Self::Demo(c) => c.provider_name(),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Gemini(c) => c.model_name(),
            Self::HuggingFace(c) => c.model_name(),
            Self::OpenAI(c) => c.model_name(),
            Self::Demo(c) => c.model_name(),
        }
    }
}
