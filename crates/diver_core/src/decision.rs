//! Decision points and the append-only story history.

use chrono::{DateTime, Utc};
use diver_error::{StoryError, StoryResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One generated narrative segment, the options offered after it, and the
/// option the user took once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DecisionPoint {
    /// Narrative text generated for this turn
    narrative: String,
    /// Choice labels offered to the user; empty means free-form input
    choices: Vec<String>,
    /// The choice actually taken, `None` until resolved
    selected: Option<String>,
    /// When this segment was generated
    generated_at: DateTime<Utc>,
}

impl DecisionPoint {
    /// Creates an unresolved decision point.
    pub fn new(narrative: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            narrative: narrative.into(),
            choices,
            selected: None,
            generated_at: Utc::now(),
        }
    }

    /// Creates an unresolved decision point that offers no choices.
    pub fn narrative_only(narrative: impl Into<String>) -> Self {
        Self::new(narrative, Vec::new())
    }

    /// Returns true while the user has not yet chosen.
    pub fn is_pending(&self) -> bool {
        self.selected.is_none()
    }

    /// Returns true when any text is an acceptable answer.
    pub fn is_free_form(&self) -> bool {
        self.choices.is_empty()
    }

    /// Returns true if `choice` matches one of the offered labels.
    pub fn offers(&self, choice: &str) -> bool {
        let choice = choice.trim();
        self.choices.iter().any(|c| c.trim() == choice)
    }
}

/// Ordered sequence of decision points.
///
/// Insertion order is the canonical playback order. Entries are only ever
/// appended or resolved; a full session reset is the only way to remove them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryHistory {
    entries: Vec<DecisionPoint>,
}

impl StoryHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed turns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no turn has completed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[DecisionPoint] {
        &self.entries
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecisionPoint> {
        self.entries.iter()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&DecisionPoint> {
        self.entries.get(index)
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&DecisionPoint> {
        self.entries.last()
    }

    /// The last entry, if it is still awaiting a choice.
    pub fn pending(&self) -> Option<&DecisionPoint> {
        self.entries.last().filter(|dp| dp.is_pending())
    }

    /// Returns true if the story is waiting on the user.
    pub fn is_awaiting_choice(&self) -> bool {
        self.pending().is_some()
    }

    /// Appends a new entry and returns its index.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidState` while the last entry still awaits a choice.
    #[instrument(skip(self, entry), fields(len = self.entries.len()))]
    pub fn append(&mut self, entry: DecisionPoint) -> StoryResult<usize> {
        if self.is_awaiting_choice() {
            return Err(StoryError::invalid_state(
                "cannot append while the last decision point awaits a choice",
            ));
        }
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        debug!(index, "Appended decision point");
        Ok(index)
    }

    /// Records the user's choice on the entry at `index`.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidState` if the index is out of range, the entry is
    /// already resolved, or the choice is blank.
    #[instrument(skip(self, choice), fields(len = self.entries.len()))]
    pub fn record_choice(&mut self, index: usize, choice: impl Into<String>) -> StoryResult<()> {
        let choice = choice.into();
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            StoryError::invalid_state(format!(
                "no decision point at index {index} (history has {len})"
            ))
        })?;

        if entry.selected.is_some() {
            return Err(StoryError::invalid_state(format!(
                "decision point {index} is already resolved"
            )));
        }
        if choice.trim().is_empty() {
            return Err(StoryError::invalid_state("choice text is blank"));
        }

        entry.selected = Some(choice.trim().to_string());
        debug!(index, "Recorded choice");
        Ok(())
    }

    /// Renders the whole story in playback order.
    ///
    /// ```
    /// use diver_core::{DecisionPoint, StoryHistory};
    ///
    /// let mut history = StoryHistory::new();
    /// history.append(DecisionPoint::new("A fork in the road.", vec!["Left".into()])).unwrap();
    /// history.record_choice(0, "Left").unwrap();
    ///
    /// let text = history.transcript();
    /// assert!(text.starts_with("--- Chapter 1 ---"));
    /// assert!(text.contains("[Decision Made: Left]"));
    /// ```
    pub fn transcript(&self) -> String {
        let mut parts = Vec::with_capacity(self.entries.len() * 3);
        for (i, entry) in self.entries.iter().enumerate() {
            parts.push(format!("--- Chapter {} ---", i + 1));
            parts.push(entry.narrative.clone());
            if let Some(choice) = &entry.selected {
                parts.push(format!("[Decision Made: {choice}]"));
            }
        }
        parts.join("\n\n")
    }
}

impl<'a> IntoIterator for &'a StoryHistory {
    type Item = &'a DecisionPoint;
    type IntoIter = std::slice::Iter<'a, DecisionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
