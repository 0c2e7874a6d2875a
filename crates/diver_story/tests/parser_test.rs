//! Tests for splitting completions into narrative and choices.

use diver_story::{CompletionParser, ParsedCompletion};

fn parser() -> CompletionParser {
    CompletionParser::new(4).unwrap()
}

fn unparsed_reason(parsed: ParsedCompletion) -> String {
    match parsed {
        ParsedCompletion::Unparsed { reason, .. } => reason,
        other => panic!("expected Unparsed, got {other:?}"),
    }
}

#[test]
fn test_parses_dot_and_paren_options() {
    let parsed = parser().parse(
        "  Smoke rises from the valley.\n\nDECISION_POINT\n1. Descend\n2) Wait for nightfall\n 3.   Signal the scouts  \n",
    );

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: "Smoke rises from the valley.".into(),
            choices: vec![
                "Descend".into(),
                "Wait for nightfall".into(),
                "Signal the scouts".into()
            ],
        }
    );
}

#[test]
fn test_without_marker_is_free_form() {
    let parsed = parser().parse("\nThe caravan moves on.\n");

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: "The caravan moves on.".into(),
            choices: vec![],
        }
    );
}

#[test]
fn test_extra_options_are_dropped() {
    let parsed = CompletionParser::new(2)
        .unwrap()
        .parse("Text.\nDECISION_POINT\n1. a\n2. b\n3. c");

    match parsed {
        ParsedCompletion::Parsed { choices, .. } => assert_eq!(choices, vec!["a", "b"]),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_marker_without_options_is_unparsed() {
    let raw = "The dragon stirs.\nDECISION_POINT\nChoose wisely.";
    let parsed = parser().parse(raw);

    match &parsed {
        ParsedCompletion::Unparsed { raw: kept, .. } => assert_eq!(kept, raw),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(unparsed_reason(parsed).contains("no numbered options"));
}

#[test]
fn test_marker_without_narrative_is_unparsed() {
    let reason = unparsed_reason(parser().parse("DECISION_POINT\n1. Go"));
    assert!(reason.contains("no narrative"));
}

#[test]
fn test_multiple_markers_are_unparsed() {
    let reason = unparsed_reason(
        parser().parse("One.\nDECISION_POINT\n1. a\nTwo.\nDECISION_POINT\n1. b"),
    );
    assert!(reason.contains("multiple"));
}

#[test]
fn test_bold_markdown_is_tolerated() {
    let parsed = parser().parse("The hall is silent.\n\n**DECISION_POINT**\n1. **Speak**\n2. Listen");

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: "The hall is silent.".into(),
            choices: vec!["Speak".into(), "Listen".into()],
        }
    );
}

#[test]
fn test_blank_completion_is_unparsed() {
    let parsed = parser().parse("  \n\t\n");

    assert_eq!(
        parsed,
        ParsedCompletion::Unparsed {
            raw: "  \n\t\n".into(),
            reason: "empty completion".into(),
        }
    );
}

#[test]
fn test_marker_inside_a_sentence_is_narrative() {
    let raw = "He muttered DECISION_POINT under his breath.\n1. A";
    let parsed = parser().parse(raw);

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: raw.into(),
            choices: vec![],
        }
    );
}

#[test]
fn test_heading_marker_is_recognised() {
    let parsed = parser().parse("The gate opens.\n\n### DECISION_POINT\n1. Enter\n2. Wait");

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: "The gate opens.".into(),
            choices: vec!["Enter".into(), "Wait".into()],
        }
    );
}

#[test]
fn test_prompt_line_after_marker_stays_in_narrative() {
    let parsed = parser().parse("The gate opens.\nDECISION_POINT\nWhat will you do?\n1. Enter\n2. Wait");

    assert_eq!(
        parsed,
        ParsedCompletion::Parsed {
            narrative: "The gate opens.\n\nWhat will you do?".into(),
            choices: vec!["Enter".into(), "Wait".into()],
        }
    );
}

#[test]
fn test_unparsed_keeps_untrimmed_completion() {
    let raw = "  A storm.\n\nDECISION_POINT\nWhat now?\n";

    match parser().parse(raw) {
        ParsedCompletion::Unparsed { raw: kept, .. } => assert_eq!(kept, raw),
        other => panic!("unexpected: {other:?}"),
    }
}
