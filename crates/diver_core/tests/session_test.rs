//! Tests for session state mutations and history bookkeeping.

use diver_core::{CharacterSheet, DecisionPoint, SessionState, StoryHistory, World};
use diver_error::StoryErrorKind;

fn ready_session() -> SessionState {
    let mut session = SessionState::new();
    session
        .create_character(CharacterSheet::sample(World::Cultivation))
        .unwrap();
    session.select_world(World::Cultivation).unwrap();
    session
}

fn scene(text: &str) -> DecisionPoint {
    DecisionPoint::new(text, vec!["Fight".to_string(), "Flee".to_string()])
}

#[test]
fn test_new_session_is_empty() {
    let session = SessionState::new();
    assert!(session.character().is_none());
    assert!(session.world().is_none());
    assert!(session.history().is_empty());
    assert!(!session.is_ready());
    assert!(!session.is_awaiting_choice());
}

#[test]
fn test_character_is_immutable_once_created() {
    let mut session = ready_session();
    let err = session
        .create_character(CharacterSheet::sample(World::Fantasy))
        .unwrap_err();
    assert!(matches!(err.kind(), StoryErrorKind::InvalidState(_)));
    assert_eq!(session.character().unwrap().name(), "Li Wei");
}

#[test]
fn test_invalid_character_rejected_with_issues() {
    let mut session = SessionState::new();
    let sheet = CharacterSheet::new("X", "short", vec![], "short");
    let err = session.create_character(sheet).unwrap_err();
    match err.kind() {
        StoryErrorKind::InvalidCharacter(issues) => assert_eq!(issues.len(), 3),
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert!(session.character().is_none());
}

#[test]
fn test_world_locked_after_story_starts() {
    let mut session = ready_session();
    session.select_world(World::Fantasy).unwrap();
    assert_eq!(session.world(), Some(World::Fantasy));

    session.append(scene("Opening")).unwrap();
    let err = session.select_world(World::SciFi).unwrap_err();
    assert!(matches!(err.kind(), StoryErrorKind::InvalidState(_)));
    assert_eq!(session.world(), Some(World::Fantasy));
}

#[test]
fn test_append_blocked_while_awaiting_choice() {
    let mut session = ready_session();
    assert_eq!(session.append(scene("one")).unwrap(), 0);
    assert!(session.is_awaiting_choice());

    let err = session.append(scene("two")).unwrap_err();
    assert!(matches!(err.kind(), StoryErrorKind::InvalidState(_)));
    assert_eq!(session.history().len(), 1);

    session.record_choice(0, "Fight").unwrap();
    assert_eq!(session.append(scene("two")).unwrap(), 1);
}

#[test]
fn test_record_choice_preconditions() {
    let mut session = ready_session();
    session.append(scene("one")).unwrap();

    let out_of_range = session.record_choice(5, "Fight").unwrap_err();
    assert!(matches!(out_of_range.kind(), StoryErrorKind::InvalidState(_)));

    let blank = session.record_choice(0, "   ").unwrap_err();
    assert!(matches!(blank.kind(), StoryErrorKind::InvalidState(_)));

    session.record_choice(0, "  Flee ").unwrap();
    assert_eq!(
        session.history().get(0).unwrap().selected().as_deref(),
        Some("Flee")
    );

    let twice = session.record_choice(0, "Fight").unwrap_err();
    assert!(matches!(twice.kind(), StoryErrorKind::InvalidState(_)));
}

#[test]
fn test_pending_iff_last_selected_is_none() {
    let mut session = ready_session();
    for i in 0..4 {
        session.append(scene(&format!("scene {i}"))).unwrap();
        assert!(session.is_awaiting_choice());
        assert!(session.history().last().unwrap().selected().is_none());

        session.record_choice(i, "Fight").unwrap();
        assert!(!session.is_awaiting_choice());
    }
    assert_eq!(session.history().len(), 4);
}

#[test]
fn test_reset_clears_everything_and_renews_id() {
    let mut session = ready_session();
    session.append(scene("one")).unwrap();
    let old_id = session.id();

    session.reset();

    assert_ne!(session.id(), old_id);
    assert!(session.character().is_none());
    assert!(session.world().is_none());
    assert!(session.history().is_empty());
}

#[test]
fn test_transcript_keeps_insertion_order() {
    let mut history = StoryHistory::new();
    history.append(scene("First scene")).unwrap();
    history.record_choice(0, "Fight").unwrap();
    history.append(scene("Second scene")).unwrap();

    let transcript = history.transcript();
    let first = transcript.find("First scene").unwrap();
    let decision = transcript.find("[Decision Made: Fight]").unwrap();
    let second = transcript.find("--- Chapter 2 ---").unwrap();
    assert!(first < decision && decision < second);
    assert_eq!(transcript.matches("[Decision Made").count(), 1);
}

#[test]
fn test_session_serializes_without_credentials() {
    let mut session = ready_session();
    session.append(scene("one")).unwrap();

    let json = serde_json::to_string(&session).unwrap();
    assert!(json.contains("\"cultivation\""));
    assert!(!json.to_lowercase().contains("api_key"));

    let restored: SessionState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);
}
