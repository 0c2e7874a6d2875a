//! Interactive fiction driven by large language models.
//!
//! This crate re-exports the diver workspace and adds layered settings.
//!
//! ```no_run
//! use diver::{CharacterSheet, Credentials, SessionState, SettingsLoader, StoryEngine, World};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsLoader::new().load()?;
//! let provider = settings.provider().connect(&Credentials::from_env())?;
//! let engine = StoryEngine::new(provider, settings.templates(), settings.engine_config())?;
//!
//! let mut session = SessionState::new();
//! session.create_character(CharacterSheet::sample(World::Fantasy))?;
//! session.select_world(World::Fantasy)?;
//!
//! let scene = engine.advance(&mut session, None).await?;
//! println!("{}", scene.narrative());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{DiverSettings, ENV_PREFIX, SettingsLoader, StorySettings, default_settings_path};

pub use diver_core::{
    CharacterSheet, CharacterSheetBuilder, DecisionPoint, GenerationParams, SessionState,
    MetricsHandle, StoryHistory, World, init_metrics, shutdown_metrics,
};
pub use diver_error::{
    ConfigError, DiverError, DiverErrorKind, DiverResult, ProviderError, ProviderErrorKind,
    StoryError, StoryErrorKind,
};
pub use diver_interface::ProviderClient;
pub use diver_models::{
    AnyProvider, ApiKey, Credentials, DemoClient, ProviderConfig, ProviderKind, RetryConfig,
    RetryingClient, verify_provider,
};
pub use diver_story::{
    CompletionParser, ContextWindow, EngineConfig, ParsedCompletion, PromptAssembler,
    StoryEngine, WorldTemplates,
};
