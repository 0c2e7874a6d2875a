//! Protagonist character sheet.

use crate::World;
use serde::{Deserialize, Serialize};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const BACKGROUND_MIN: usize = 10;
const BACKGROUND_MAX: usize = 1000;
const GOAL_MIN: usize = 10;
const GOAL_MAX: usize = 500;

/// The protagonist of a story session.
///
/// Created once at session start and never modified afterwards.
///
/// # Examples
///
/// ```
/// use diver_core::CharacterSheet;
///
/// let sheet = CharacterSheet::builder()
///     .name("Li Wei")
///     .background("disgraced sect disciple")
///     .traits(vec!["stubborn".to_string(), "quick-witted".to_string()])
///     .goal("reclaim his spirit sword")
///     .build()
///     .unwrap();
///
/// assert_eq!(sheet.name(), "Li Wei");
/// assert!(sheet.validate().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CharacterSheet {
    /// Character's name
    name: String,
    /// Backstory and origin
    background: String,
    /// Personality traits, in the order the user listed them
    #[builder(default)]
    traits: Vec<String>,
    /// Main objective driving the story
    goal: String,
}

impl CharacterSheet {
    /// Creates a character sheet from its four fields.
    pub fn new(
        name: impl Into<String>,
        background: impl Into<String>,
        traits: Vec<String>,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
            traits,
            goal: goal.into(),
        }
    }

    /// Returns a builder for constructing a CharacterSheet.
    pub fn builder() -> CharacterSheetBuilder {
        CharacterSheetBuilder::default()
    }

    /// Checks the sheet against the form limits and returns every issue found.
    ///
    /// An empty list means the sheet is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.trim().chars().count() < NAME_MIN {
            issues.push(format!("Name must be at least {NAME_MIN} characters long"));
        }
        if self.background.trim().chars().count() < BACKGROUND_MIN {
            issues.push(format!(
                "Background must be at least {BACKGROUND_MIN} characters long"
            ));
        }
        if self.goal.trim().chars().count() < GOAL_MIN {
            issues.push(format!("Goal must be at least {GOAL_MIN} characters long"));
        }

        if self.name.chars().count() > NAME_MAX {
            issues.push(format!("Name is too long (max {NAME_MAX} characters)"));
        }
        if self.background.chars().count() > BACKGROUND_MAX {
            issues.push(format!(
                "Background is too long (max {BACKGROUND_MAX} characters)"
            ));
        }
        if self.goal.chars().count() > GOAL_MAX {
            issues.push(format!("Goal is too long (max {GOAL_MAX} characters)"));
        }

        issues
    }

    /// A ready-made protagonist for the given world.
    pub fn sample(world: World) -> Self {
        match world {
            World::Cultivation => Self::new(
                "Li Wei",
                "A young orphan discovered to have rare spiritual roots, taken in by the Azure Mountain Sect after showing promise in cultivation.",
                vec!["Determined".into(), "Humble".into(), "Quick-learner".into(), "Loyal".into()],
                "To avenge his deceased master and reach the peak of cultivation to protect those he cares about.",
            ),
            World::MartialArts => Self::new(
                "Chen Ming",
                "The last surviving student of the destroyed Iron Fist School, wandering the jianghu to restore his school's honor.",
                vec!["Honorable".into(), "Skilled fighter".into(), "Seeking justice".into(), "Stubborn".into()],
                "To find and defeat the masked warriors who destroyed his school and master.",
            ),
            World::Fantasy => Self::new(
                "Aria Nightwhisper",
                "A half-elf mage apprentice who discovered an ancient spellbook in her village's ruins after a dragon attack.",
                vec!["Curious".into(), "Brave".into(), "Magically gifted".into(), "Compassionate".into()],
                "To master the ancient magic and prevent the return of the dark dragon lord.",
            ),
            World::SciFi => Self::new(
                "Kira Vance",
                "A salvage pilot who pulled a sealed alien data core from a derelict freighter at the edge of charted space.",
                vec!["Resourceful".into(), "Sardonic".into(), "Ace pilot".into()],
                "To decode the data core before the corporation hunting it catches up.",
            ),
            World::ModernUrban => Self::new(
                "Daniel Park",
                "A night-shift paramedic who started seeing the spirits that linger around the city's accident sites.",
                vec!["Empathetic".into(), "Sleep-deprived".into(), "Steady under pressure".into()],
                "To learn why the spirits are multiplying and stop whatever is feeding on them.",
            ),
        }
    }
}

impl std::fmt::Display for CharacterSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
