//! Tests for prompt assembly and the context window.

use diver_core::{CharacterSheet, DecisionPoint, StoryHistory, World};
use diver_story::{ContextWindow, PromptAssembler, WorldTemplates};

fn li_wei() -> CharacterSheet {
    CharacterSheet::new(
        "Li Wei",
        "disgraced sect disciple",
        vec!["stubborn".into(), "quick-witted".into()],
        "reclaim his spirit sword",
    )
}

fn assembler(window: ContextWindow) -> PromptAssembler {
    PromptAssembler::new(WorldTemplates::builtin(), window, 4)
}

fn history_of(n: usize) -> StoryHistory {
    let mut history = StoryHistory::new();
    for i in 1..=n {
        history
            .append(DecisionPoint::new(format!("Narrative of entry {i}."), vec![format!("Choice {i}")]))
            .unwrap();
        history.record_choice(i - 1, format!("Choice {i}")).unwrap();
    }
    history
}

#[test]
fn test_character_fields_appear_verbatim() {
    let prompt = assembler(ContextWindow::default()).build(
        World::Cultivation,
        &li_wei(),
        &StoryHistory::new(),
    );

    for field in ["Li Wei", "disgraced sect disciple", "stubborn", "quick-witted", "reclaim his spirit sword"] {
        assert!(prompt.contains(field), "prompt is missing {field:?}");
    }
    assert!(prompt.contains(World::Cultivation.label()));
    assert!(prompt.contains(WorldTemplates::default_for(World::Cultivation)));
}

#[test]
fn test_build_is_deterministic() {
    let assembler = assembler(ContextWindow::default());
    let history = history_of(3);

    let first = assembler.build(World::Fantasy, &li_wei(), &history);
    let second = assembler.build(World::Fantasy, &li_wei(), &history.clone());

    assert_eq!(first, second);
}

#[test]
fn test_window_of_two_entries_keeps_the_newest_in_order() {
    let window = ContextWindow::builder().max_entries(Some(2usize)).build().unwrap();
    let prompt = assembler(window).build(World::Fantasy, &li_wei(), &history_of(5));

    for omitted in 1..=3 {
        assert!(!prompt.contains(&format!("Narrative of entry {omitted}.")));
    }
    let fourth = prompt.find("Narrative of entry 4.").expect("entry 4 present");
    let fifth = prompt.find("Narrative of entry 5.").expect("entry 5 present");
    assert!(fourth < fifth);
    assert!(prompt.contains("(Earlier scenes omitted: 3)"));
}

#[test]
fn test_char_budget_drops_oldest_first() {
    let history = history_of(5);
    let budget: usize = (3..5)
        .map(|i| PromptAssembler::serialize_entry(i, history.get(i).unwrap()).chars().count())
        .sum();
    let window = ContextWindow::builder().max_chars(budget).build().unwrap();
    let assembler = assembler(window);

    assert_eq!(assembler.window_start(&history), 3);
    let prompt = assembler.build(World::SciFi, &li_wei(), &history);
    assert!(prompt.contains("--- Scene 4 ---"));
    assert!(prompt.contains("--- Scene 5 ---"));
    assert!(!prompt.contains("--- Scene 3 ---"));
}

#[test]
fn test_newest_entry_survives_a_tiny_budget() {
    let window = ContextWindow::builder().max_chars(1usize).build().unwrap();
    let prompt = assembler(window).build(World::SciFi, &li_wei(), &history_of(2));

    assert!(prompt.contains("Narrative of entry 2."));
    assert!(!prompt.contains("Narrative of entry 1."));
}

#[test]
fn test_full_history_within_budget_has_no_omission_note() {
    let prompt = assembler(ContextWindow::default()).build(World::Fantasy, &li_wei(), &history_of(3));

    assert!(!prompt.contains("omitted"));
    assert!(prompt.contains("[Decision Made: Choice 3]"));
    assert!(prompt.contains("The player chose: \"Choice 3\""));
}

#[test]
fn test_serialize_entry_layout() {
    let mut history = StoryHistory::new();
    history
        .append(DecisionPoint::new("The gate.", vec!["Knock".into(), "Climb".into()]))
        .unwrap();
    history.record_choice(0, "Climb").unwrap();

    let text = PromptAssembler::serialize_entry(0, history.get(0).unwrap());

    assert_eq!(
        text,
        "--- Scene 1 ---\nThe gate.\nOptions offered:\n1. Knock\n2. Climb\n[Decision Made: Climb]"
    );
}
