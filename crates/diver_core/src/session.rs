//! The mutable record for one user session.

use crate::{CharacterSheet, DecisionPoint, StoryHistory, World};
use chrono::{DateTime, Utc};
use diver_error::{StoryError, StoryErrorKind, StoryResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Session state: one character sheet, one world, one history.
///
/// A session has exactly one writer. Mutations are synchronous and validate
/// their preconditions before touching any field, so a rejected mutation
/// leaves the state unchanged.
///
/// # Examples
///
/// ```
/// use diver_core::{CharacterSheet, DecisionPoint, SessionState, World};
///
/// let mut session = SessionState::new();
/// session.create_character(CharacterSheet::sample(World::Fantasy)).unwrap();
/// session.select_world(World::Fantasy).unwrap();
///
/// let index = session.append(DecisionPoint::new("The tavern door creaks.", vec!["Enter".into()])).unwrap();
/// assert!(session.is_awaiting_choice());
///
/// session.record_choice(index, "Enter").unwrap();
/// assert!(!session.is_awaiting_choice());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    id: Uuid,
    character: Option<CharacterSheet>,
    world: Option<World>,
    history: StoryHistory,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Starts an empty session.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            character: None,
            world: None,
            history: StoryHistory::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The protagonist, once created.
    pub fn character(&self) -> Option<&CharacterSheet> {
        self.character.as_ref()
    }

    /// The selected world, once chosen.
    pub fn world(&self) -> Option<World> {
        self.world
    }

    /// The story so far.
    pub fn history(&self) -> &StoryHistory {
        &self.history
    }

    /// When the session started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session last changed.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns true once both a character and a world are set.
    pub fn is_ready(&self) -> bool {
        self.character.is_some() && self.world.is_some()
    }

    /// Returns true if the last decision point awaits the user.
    pub fn is_awaiting_choice(&self) -> bool {
        self.history.is_awaiting_choice()
    }

    /// Sets the protagonist.
    ///
    /// # Errors
    ///
    /// `InvalidState` if a character already exists, `InvalidCharacter` if the
    /// sheet fails validation.
    #[instrument(skip(self, character), fields(session = %self.id))]
    pub fn create_character(&mut self, character: CharacterSheet) -> StoryResult<()> {
        if self.character.is_some() {
            return Err(StoryError::invalid_state(
                "character already created for this session",
            ));
        }
        let issues = character.validate();
        if !issues.is_empty() {
            return Err(StoryError::new(StoryErrorKind::InvalidCharacter(issues)));
        }

        info!(name = %character.name(), "Character created");
        self.character = Some(character);
        self.touch();
        Ok(())
    }

    /// Chooses the world the story is set in.
    ///
    /// # Errors
    ///
    /// `InvalidState` once the story has started.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn select_world(&mut self, world: World) -> StoryResult<()> {
        if !self.history.is_empty() {
            return Err(StoryError::invalid_state(
                "world cannot change after the story has started",
            ));
        }

        info!(%world, "World selected");
        self.world = Some(world);
        self.touch();
        Ok(())
    }

    /// Appends a decision point and returns its index.
    ///
    /// # Errors
    ///
    /// `InvalidState` while the last entry still awaits a choice.
    pub fn append(&mut self, entry: DecisionPoint) -> StoryResult<usize> {
        let index = self.history.append(entry)?;
        self.touch();
        Ok(index)
    }

    /// Records the user's choice on the entry at `index`.
    ///
    /// # Errors
    ///
    /// `InvalidState` for an unknown or already-resolved entry or blank text.
    pub fn record_choice(&mut self, index: usize, choice: impl Into<String>) -> StoryResult<()> {
        self.history.record_choice(index, choice)?;
        self.touch();
        Ok(())
    }

    /// Discards everything and starts over under a fresh session id.
    #[instrument(skip(self), fields(session = %self.id, turns = self.history.len()))]
    pub fn reset(&mut self) {
        let previous = self.id;
        *self = Self::new();
        debug!(%previous, session = %self.id, "Session reset");
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}
