//! Splitting completions into narrative and offered choices.

use diver_error::ConfigError;
use regex::Regex;
use tracing::{debug, instrument, warn};

/// Line that separates a scene from its numbered options.
pub const DECISION_MARKER: &str = "DECISION_POINT";

/// Result of parsing one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCompletion {
    /// The completion followed the choice contract.
    ///
    /// `choices` is empty when the completion had no marker at all, which is
    /// a free-form continuation.
    Parsed {
        /// Scene text
        narrative: String,
        /// Offered options, in order
        choices: Vec<String>,
    },
    /// The completion had a marker but could not be split.
    Unparsed {
        /// The completion exactly as the provider returned it
        raw: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Parses `DECISION_POINT` followed by `1. option` or `1) option` lines.
#[derive(Debug, Clone)]
pub struct CompletionParser {
    option_line: Regex,
    max_choices: usize,
}

impl CompletionParser {
    /// Creates a parser that keeps at most `max_choices` options.
    ///
    /// # Errors
    ///
    /// Fails if the option pattern cannot be compiled.
    pub fn new(max_choices: usize) -> Result<Self, ConfigError> {
        let option_line = Regex::new(r"^\s*\d+\s*[.)]\s*(.+?)\s*$")
            .map_err(|e| ConfigError::new(format!("Invalid option pattern: {}", e)))?;
        Ok(Self {
            option_line,
            max_choices: max_choices.max(1),
        })
    }

    /// Maximum number of options kept.
    pub fn max_choices(&self) -> usize {
        self.max_choices
    }

    /// Splits a completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use diver_story::{CompletionParser, ParsedCompletion};
    ///
    /// let parser = CompletionParser::new(4).unwrap();
    /// let parsed = parser.parse("The bridge sways.\n\nDECISION_POINT\n1. Cross\n2) Turn back");
    ///
    /// assert_eq!(
    ///     parsed,
    ///     ParsedCompletion::Parsed {
    ///         narrative: "The bridge sways.".into(),
    ///         choices: vec!["Cross".into(), "Turn back".into()],
    ///     }
    /// );
    /// ```
    #[instrument(skip_all, fields(chars = raw.len()))]
    pub fn parse(&self, raw: &str) -> ParsedCompletion {
        let unparsed = |reason: &str| {
            warn!(reason, "Completion does not follow the choice contract");
            ParsedCompletion::Unparsed {
                raw: raw.to_string(),
                reason: reason.to_string(),
            }
        };

        let text = raw.trim();
        if text.is_empty() {
            return unparsed("empty completion");
        }

        let lines: Vec<&str> = text.lines().collect();
        let mut markers = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_marker_line(line))
            .map(|(at, _)| at);
        let Some(at) = markers.next() else {
            debug!("No decision marker, free-form continuation");
            return ParsedCompletion::Parsed {
                narrative: text.to_string(),
                choices: Vec::new(),
            };
        };
        if markers.next().is_some() {
            return unparsed("multiple DECISION_POINT markers");
        }

        let before = lines[..at].join("\n");
        let narrative = before.trim();
        if narrative.is_empty() {
            return unparsed("no narrative before DECISION_POINT");
        }

        let mut choices = Vec::new();
        let mut trailing = Vec::new();
        for line in &lines[at + 1..] {
            match self.option_line.captures(line).and_then(|caps| caps.get(1)) {
                Some(label) => {
                    let label = label.as_str().trim_matches('*').trim();
                    if !label.is_empty() {
                        choices.push(label.to_string());
                    }
                }
                None if !line.trim().is_empty() => trailing.push(line.trim()),
                None => {}
            }
        }

        if choices.is_empty() {
            return unparsed("no numbered options after DECISION_POINT");
        }
        choices.truncate(self.max_choices);

        // Prompt lines the model wrote around the options stay with the scene
        let narrative = if trailing.is_empty() {
            narrative.to_string()
        } else {
            format!("{}\n\n{}", narrative, trailing.join("\n"))
        };

        debug!(choices = choices.len(), "Parsed decision point");
        ParsedCompletion::Parsed { narrative, choices }
    }
}

/// A line holding only the marker, allowing markdown bold or heading marks.
fn is_marker_line(line: &str) -> bool {
    line.trim().trim_matches(['*', '#']).trim() == DECISION_MARKER
}