//! Layered settings.
//!
//! # Load Order
//!
//! 1. Built-in defaults
//! 2. Settings file (`--config`, else `<config_dir>/diver/diver.toml` if present)
//! 3. Environment variables (`DIVER__SECTION__KEY`, e.g. `DIVER__PROVIDER__KIND=demo`)
//!
//! Each layer overrides the previous. Credentials are never part of the
//! settings; they come from the provider's own environment variable.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use diver_core::GenerationParams;
use diver_error::ConfigError;
use diver_models::{ProviderConfig, RetryConfig};
use diver_story::{ContextWindow, EngineConfig, WorldTemplates};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "DIVER";

/// Default settings file location, if the platform has a config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("diver").join("diver.toml"))
}

/// The `[story]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StorySettings {
    /// Accept any text when a scene offered choices
    allow_free_text: bool,
    /// Options kept per scene
    max_choices: usize,
    /// History replayed into each prompt
    context: ContextWindow,
    /// Directory of `<world>.txt` template overrides
    templates_dir: Option<PathBuf>,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            allow_free_text: false,
            max_choices: 4,
            context: ContextWindow::default(),
            templates_dir: None,
        }
    }
}

/// Everything the binary reads from settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct DiverSettings {
    /// Provider choice and endpoint overrides
    provider: ProviderConfig,
    /// Sampling parameters
    generation: GenerationParams,
    /// Story behaviour
    story: StorySettings,
    /// Retry policy for provider calls
    retry: RetryConfig,
}

impl DiverSettings {
    /// Engine configuration assembled from the `generation` and `story` sections.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::builder()
            .params(self.generation.clone())
            .allow_free_text(self.story.allow_free_text)
            .max_choices(self.story.max_choices)
            .context(self.story.context.clone())
            .build()
            .unwrap_or_default()
    }

    /// World templates, overlaid from `templates_dir` when set.
    pub fn templates(&self) -> WorldTemplates {
        match &self.story.templates_dir {
            Some(dir) => WorldTemplates::from_dir(dir),
            None => WorldTemplates::builtin(),
        }
    }

    /// Replaces the provider section.
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Forces free-text answers on.
    pub fn allow_free_text(mut self) -> Self {
        self.story.allow_free_text = true;
        self
    }
}

/// Builds [`DiverSettings`] from its layers.
///
/// ```no_run
/// use diver::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .with_file("diver.toml")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), diver_error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    skip_env: bool,
    skip_default_file: bool,
}

impl SettingsLoader {
    /// Loader using the default file location and the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `path` instead of the default location. The file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Ignores `DIVER__*` variables.
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Ignores the default settings file location.
    pub fn skip_default_file(mut self) -> Self {
        self.skip_default_file = true;
        self
    }

    /// Merges the layers.
    ///
    /// # Errors
    ///
    /// Fails if an explicit file is missing, a file cannot be parsed, or a
    /// value has the wrong type.
    #[instrument(skip(self), fields(file = ?self.file, skip_env = self.skip_env))]
    pub fn load(&self) -> Result<DiverSettings, ConfigError> {
        let defaults = Config::try_from(&DiverSettings::default())
            .map_err(|e| ConfigError::new(format!("Failed to encode default settings: {}", e)))?;
        let mut builder = Config::builder().add_source(defaults);

        let file = match &self.file {
            Some(path) => Some((path.clone(), true)),
            None if self.skip_default_file => None,
            None => default_settings_path().map(|path| (path, false)),
        };
        if let Some((path, required)) = file {
            debug!(path = %path.display(), required, "Adding settings file");
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        if !self.skip_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: DiverSettings = builder
            .build()
            .and_then(|merged| merged.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load settings: {}", e)))?;

        info!(
            provider = ?settings.provider.kind(),
            max_choices = settings.story.max_choices,
            "Settings loaded"
        );
        Ok(settings)
    }
}
