//! The turn engine.

use crate::metrics::StoryMetrics;
use crate::parser::{CompletionParser, ParsedCompletion};
use crate::prompt::{ContextWindow, PromptAssembler};
use crate::templates::WorldTemplates;
use derive_builder::Builder;
use derive_getters::Getters;
use diver_core::{DecisionPoint, GenerationParams, SessionState};
use diver_error::{ConfigError, DiverResult, StoryError, StoryErrorKind};
use diver_interface::ProviderClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Story behaviour knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct EngineConfig {
    /// Sampling parameters for every turn
    params: GenerationParams,
    /// Accept any text when a scene offered choices
    allow_free_text: bool,
    /// Options kept per scene
    max_choices: usize,
    /// History replayed into each prompt
    context: ContextWindow,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            params: GenerationParams::default(),
            allow_free_text: false,
            max_choices: 4,
            context: ContextWindow::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a builder seeded with the defaults.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Runs one story turn at a time against a provider.
///
/// A turn records the user's choice, builds the prompt, generates, parses
/// and appends the new scene. History only changes once the provider has
/// answered, so a failed call leaves the session exactly as it was.
#[derive(Debug)]
pub struct StoryEngine<P> {
    provider: P,
    assembler: PromptAssembler,
    parser: CompletionParser,
    config: EngineConfig,
    metrics: StoryMetrics,
}

impl<P: ProviderClient> StoryEngine<P> {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Fails if the completion parser cannot be built.
    pub fn new(
        provider: P,
        templates: WorldTemplates,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        let assembler =
            PromptAssembler::new(templates, config.context.clone(), config.max_choices);
        let parser = CompletionParser::new(config.max_choices)?;
        info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            max_choices = config.max_choices,
            allow_free_text = config.allow_free_text,
            "Story engine ready"
        );
        Ok(Self {
            provider,
            assembler,
            parser,
            config,
            metrics: StoryMetrics::new(),
        })
    }

    /// The provider in use.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The prompt assembler in use.
    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advances the story by one scene.
    ///
    /// `choice` answers the scene currently awaiting input and must be absent
    /// when nothing is awaiting input (including the opening turn).
    ///
    /// # Errors
    ///
    /// - `InvalidState` when the session has no character or world, a choice
    ///   is missing or unexpected, or the choice is not one of the offered
    ///   labels. Nothing is sent to the provider.
    /// - The provider's error, unchanged, when generation fails. The session
    ///   is untouched.
    /// - `Parse` when the completion breaks the choice contract. The choice
    ///   and the raw text (as a narrative-only entry) are still recorded.
    #[instrument(skip(self, session, choice), fields(session = %session.id(), turn = session.history().len() + 1, provider = self.provider.provider_name()))]
    pub async fn advance(
        &self,
        session: &mut SessionState,
        choice: Option<&str>,
    ) -> DiverResult<DecisionPoint> {
        let (Some(character), Some(world)) = (session.character(), session.world()) else {
            return Err(StoryError::invalid_state(
                "a character and a world must be set before the story can start",
            )
            .into());
        };

        let answer = self.check_choice(session, choice)?;

        let mut staged = session.history().clone();
        if let Some((index, text)) = &answer {
            staged.record_choice(*index, text.as_str())?;
        }
        let prompt = self.assembler.build(world, character, &staged);

        let provider_name = self.provider.provider_name();
        let completion = match self.provider.generate(&prompt, &self.config.params).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Provider call failed, history unchanged");
                self.metrics
                    .record_provider_failure(provider_name, e.is_retryable());
                return Err(e.into());
            }
        };

        if let Some((index, text)) = answer {
            session.record_choice(index, text)?;
        }

        match self.parser.parse(&completion) {
            ParsedCompletion::Parsed { narrative, choices } => {
                let entry = DecisionPoint::new(narrative, choices);
                let index = session.append(entry.clone())?;
                self.metrics.record_turn(provider_name, world.as_ref());
                debug!(index, choices = entry.choices().len(), "Scene appended");
                Ok(entry)
            }
            ParsedCompletion::Unparsed { raw, reason } => {
                let index = session.append(DecisionPoint::narrative_only(raw))?;
                self.metrics.record_parse_failure(provider_name);
                warn!(index, %reason, "Stored raw completion as narrative-only scene");
                Err(StoryError::new(StoryErrorKind::Parse { index, reason }).into())
            }
        }
    }

    /// Validates `choice` against the entry awaiting input, returning its
    /// index and trimmed text.
    fn check_choice(
        &self,
        session: &SessionState,
        choice: Option<&str>,
    ) -> Result<Option<(usize, String)>, StoryError> {
        let history = session.history();
        let awaiting = history.pending().map(|entry| (history.len() - 1, entry));

        match (awaiting, choice) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(StoryError::invalid_state(
                "no scene is awaiting a choice",
            )),
            (Some((index, _)), None) => Err(StoryError::invalid_state(format!(
                "scene {} is awaiting a choice",
                index + 1
            ))),
            (Some((index, entry)), Some(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(StoryError::invalid_state("choice text is blank"));
                }
                if !entry.is_free_form() && !self.config.allow_free_text && !entry.offers(text) {
                    return Err(StoryError::invalid_state(format!(
                        "\"{}\" is not one of the offered choices",
                        text
                    )));
                }
                Ok(Some((index, text.to_string())))
            }
        }
    }
}
