//! Prompt assembly and the history context window.

use crate::parser::DECISION_MARKER;
use crate::templates::WorldTemplates;
use derive_builder::Builder;
use derive_getters::Getters;
use diver_core::{CharacterSheet, DecisionPoint, StoryHistory, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bounds on how much history is replayed into each prompt.
///
/// Entries are taken newest first until either limit is reached. The most
/// recent entry is always included, even if it alone exceeds `max_chars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ContextWindow {
    /// Budget for the serialized history, in characters
    max_chars: usize,
    /// Cap on the number of entries replayed; `None` means no cap
    max_entries: Option<usize>,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            max_chars: 16_000,
            max_entries: None,
        }
    }
}

impl ContextWindow {
    /// Creates a builder seeded with the defaults.
    pub fn builder() -> ContextWindowBuilder {
        ContextWindowBuilder::default()
    }

    /// Index of the oldest entry that fits, given each entry's serialized size.
    fn first_included(&self, sizes: &[usize]) -> usize {
        let Some(newest) = sizes.len().checked_sub(1) else {
            return 0;
        };
        let mut first = newest;
        let mut used = sizes[newest];

        while first > 0 {
            let candidate = first - 1;
            let count = sizes.len() - candidate;
            if self.max_entries.is_some_and(|max| count > max) {
                break;
            }
            if used + sizes[candidate] > self.max_chars {
                break;
            }
            used += sizes[candidate];
            first = candidate;
        }
        first
    }
}

/// Renders world, character and history into the text sent to the provider.
///
/// [`build`](Self::build) is a pure function of its arguments and the
/// assembler's own configuration.
#[derive(Debug, Clone, Getters)]
pub struct PromptAssembler {
    templates: WorldTemplates,
    window: ContextWindow,
    max_choices: usize,
}

impl PromptAssembler {
    /// Creates an assembler.
    pub fn new(templates: WorldTemplates, window: ContextWindow, max_choices: usize) -> Self {
        Self {
            templates,
            window,
            max_choices: max_choices.max(1),
        }
    }

    /// Builds the prompt for the next scene.
    ///
    /// # Examples
    ///
    /// ```
    /// use diver_core::{CharacterSheet, StoryHistory, World};
    /// use diver_story::{ContextWindow, PromptAssembler, WorldTemplates};
    ///
    /// let assembler = PromptAssembler::new(WorldTemplates::builtin(), ContextWindow::default(), 4);
    /// let hero = CharacterSheet::sample(World::Fantasy);
    /// let prompt = assembler.build(World::Fantasy, &hero, &StoryHistory::new());
    ///
    /// assert!(prompt.contains(hero.name()));
    /// assert!(prompt.contains("DECISION_POINT"));
    /// ```
    #[instrument(skip_all, fields(world = %world, entries = history.len()))]
    pub fn build(&self, world: World, character: &CharacterSheet, history: &StoryHistory) -> String {
        let mut sections = vec![
            format!("SETTING: {}\n{}", world.label(), self.templates.get(world)),
            Self::character_block(character),
            self.rules_block(),
        ];

        if !history.is_empty() {
            sections.push(self.history_block(history));
        }
        sections.push(Self::instruction(character, history));

        let prompt = sections.join("\n\n");
        debug!(chars = prompt.len(), "Assembled prompt");
        prompt
    }

    /// Serializes one history entry; `index` is its zero-based position.
    pub fn serialize_entry(index: usize, entry: &DecisionPoint) -> String {
        let mut lines = vec![format!("--- Scene {} ---", index + 1), entry.narrative().clone()];
        if !entry.choices().is_empty() {
            lines.push("Options offered:".to_string());
            lines.extend(
                entry
                    .choices()
                    .iter()
                    .enumerate()
                    .map(|(i, choice)| format!("{}. {}", i + 1, choice)),
            );
        }
        if let Some(choice) = entry.selected() {
            lines.push(format!("[Decision Made: {}]", choice));
        }
        lines.join("\n")
    }

    /// Index of the oldest history entry that fits the context window.
    pub fn window_start(&self, history: &StoryHistory) -> usize {
        let sizes: Vec<usize> = history
            .iter()
            .enumerate()
            .map(|(i, entry)| Self::serialize_entry(i, entry).chars().count())
            .collect();
        self.window.first_included(&sizes)
    }

    fn character_block(character: &CharacterSheet) -> String {
        let traits = if character.traits().is_empty() {
            "none listed".to_string()
        } else {
            character.traits().join(", ")
        };
        format!(
            "PROTAGONIST\nName: {}\nBackground: {}\nTraits: {}\nGoal: {}",
            character.name(),
            character.background(),
            traits,
            character.goal()
        )
    }

    fn rules_block(&self) -> String {
        let example: Vec<String> = (1..=self.max_choices)
            .map(|i| format!("{}. [option {}]", i, i))
            .collect();
        format!(
            "STORY RULES\n\
             - Write in the second person, 200 to 400 words per scene.\n\
             - Keep the protagonist's background, traits and goal consistent.\n\
             - Let earlier decisions have visible consequences.\n\
             \n\
             FORMAT\n\
             Write the scene, then a line containing exactly {marker}, then up to {n} \
             numbered options, one per line:\n\
             [scene text]\n\
             \n\
             {marker}\n\
             {options}",
            marker = DECISION_MARKER,
            n = self.max_choices,
            options = example.join("\n"),
        )
    }

    fn history_block(&self, history: &StoryHistory) -> String {
        let start = self.window_start(history);
        let mut lines = vec!["STORY SO FAR".to_string()];
        if start > 0 {
            lines.push(format!("(Earlier scenes omitted: {})", start));
        }
        lines.extend(
            history
                .iter()
                .enumerate()
                .skip(start)
                .map(|(i, entry)| Self::serialize_entry(i, entry)),
        );
        lines.join("\n\n")
    }

    fn instruction(character: &CharacterSheet, history: &StoryHistory) -> String {
        match history.last() {
            None => format!(
                "Begin the story. Introduce {} in an opening scene that ties into their \
                 background and puts their goal within reach but at risk, then present the \
                 first decision.",
                character.name()
            ),
            Some(last) => match last.selected() {
                Some(choice) => format!(
                    "The player chose: \"{}\"\nContinue the story from this decision. Show its \
                     consequences, then present the next decision.",
                    choice
                ),
                None => "Continue the story from the last scene, then present the next decision."
                    .to_string(),
            },
        }
    }
}
