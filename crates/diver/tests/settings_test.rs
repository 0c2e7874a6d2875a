//! Tests for layered settings loading.

use diver::{DiverSettings, ProviderKind, SettingsLoader, World};
use std::fs;

fn loader() -> SettingsLoader {
    SettingsLoader::new().skip_env_vars().skip_default_file()
}

#[test]
fn test_defaults_without_any_file() {
    let settings = loader().load().unwrap();

    assert_eq!(settings, DiverSettings::default());
    assert_eq!(*settings.provider().kind(), None);
    assert_eq!(*settings.provider().timeout_secs(), 30);
    assert_eq!(*settings.generation().max_tokens(), 800);
    assert_eq!(*settings.story().max_choices(), 4);
    assert_eq!(*settings.retry().max_retries(), 3);
}

#[test]
fn test_file_overrides_only_the_keys_it_sets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diver.toml");
    fs::write(
        &path,
        r#"
[provider]
kind = "openai"
model = "gpt-4o-mini"

[generation]
temperature = 0.9

[story]
allow_free_text = true
max_choices = 3

[story.context]
max_entries = 6

[retry]
max_retries = 1
"#,
    )
    .unwrap();

    let settings = loader().with_file(&path).load().unwrap();

    assert_eq!(*settings.provider().kind(), Some(ProviderKind::OpenAI));
    assert_eq!(settings.provider().model().as_deref(), Some("gpt-4o-mini"));
    assert_eq!(*settings.provider().timeout_secs(), 30);
    assert_eq!(*settings.generation().temperature(), 0.9);
    assert_eq!(*settings.generation().max_tokens(), 800);
    assert_eq!(*settings.retry().max_retries(), 1);

    let engine = settings.engine_config();
    assert!(*engine.allow_free_text());
    assert_eq!(*engine.max_choices(), 3);
    assert_eq!(*engine.context().max_entries(), Some(6));
    assert_eq!(*engine.context().max_chars(), 16_000);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = loader()
        .with_file("/no/such/diver.toml")
        .load()
        .unwrap_err();
    assert!(err.message.contains("Failed to load settings"));
}

#[test]
fn test_bad_value_type_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diver.toml");
    fs::write(&path, "[story]\nmax_choices = \"lots\"\n").unwrap();

    assert!(loader().with_file(&path).load().is_err());
}

#[test]
fn test_templates_dir_overlays_world_text() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("cultivation.txt"), "Nine heavens, one path.").unwrap();
    let path = dir.path().join("diver.toml");
    fs::write(
        &path,
        format!("[story]\ntemplates_dir = {:?}\n", templates.display().to_string()),
    )
    .unwrap();

    let settings = loader().with_file(&path).load().unwrap();

    assert_eq!(
        settings.templates().get(World::Cultivation),
        "Nine heavens, one path."
    );
}
